use serde_json::json;

use a11y_guide_client::routing::{resolve, Navigation};
use a11y_guide_client::session::{MemoryStorage, Session};

fn session_with_role(role: &str) -> Session {
    let session = Session::new(Box::new(MemoryStorage::new()));
    let user = serde_json::from_value(json!({
        "id": "u1", "username": "anna", "role": role
    }))
    .unwrap();
    session.establish("tok", &user);
    session
}

fn redirect_target(nav: Navigation) -> Option<String> {
    match nav {
        Navigation::Redirect { to } => Some(to),
        Navigation::Allow { .. } => None,
    }
}

#[test]
fn dashboard_access_matrix() {
    // (role, path, allowed)
    let cases = [
        ("admin", "/dashboard/admin", true),
        ("admin", "/dashboard/designer", true),
        ("admin", "/dashboard/developer", true),
        ("admin", "/dashboard/tester", true),
        ("designer", "/dashboard/designer", true),
        ("designer", "/dashboard/admin", false),
        ("designer", "/dashboard/developer", false),
        ("developer", "/dashboard/developer", true),
        ("developer", "/dashboard/tester", false),
        ("tester", "/dashboard/tester", true),
        ("tester", "/dashboard/designer", false),
        ("tester", "/dashboard/admin", false),
    ];

    for (role, path, allowed) in cases {
        let session = session_with_role(role);
        let nav = resolve(path, &session);
        match (allowed, &nav) {
            (true, Navigation::Allow { .. }) => {}
            (false, Navigation::Redirect { to }) => assert_eq!(to, "/unauthorized"),
            _ => panic!("{role} at {path}: unexpected {nav:?}"),
        }
    }
}

#[test]
fn every_dashboard_title_carries_the_app_suffix() {
    let expectations = [
        ("admin", "/dashboard/admin", "Administratör Dashboard"),
        ("designer", "/dashboard/designer", "Designer Dashboard"),
        ("developer", "/dashboard/developer", "Utvecklare Dashboard"),
        ("tester", "/dashboard/tester", "Testare Dashboard"),
    ];

    for (role, path, page) in expectations {
        let session = session_with_role(role);
        match resolve(path, &session) {
            Navigation::Allow { title, .. } => {
                assert_eq!(title, format!("{page} - Guide för webbtillgänglighet"));
            }
            other => panic!("{path}: unexpected {other:?}"),
        }
    }
}

#[test]
fn dashboard_titles_name_the_visitor_not_the_route() {
    let session = session_with_role("admin");

    for path in ["/dashboard/designer", "/dashboard/developer", "/dashboard/tester"] {
        match resolve(path, &session) {
            Navigation::Allow { title, .. } => {
                assert_eq!(
                    title, "Administratör Dashboard - Guide för webbtillgänglighet",
                    "{path}"
                );
            }
            other => panic!("{path}: unexpected {other:?}"),
        }
    }
}

#[test]
fn anonymous_navigation_lands_on_login() {
    let session = Session::new(Box::new(MemoryStorage::new()));

    assert_eq!(redirect_target(resolve("/", &session)).as_deref(), Some("/login"));
    assert_eq!(redirect_target(resolve("/status", &session)).as_deref(), Some("/login"));
    assert_eq!(
        redirect_target(resolve("/dashboard/tester", &session)).as_deref(),
        Some("/login")
    );
    assert!(redirect_target(resolve("/login", &session)).is_none());
    assert!(redirect_target(resolve("/unauthorized", &session)).is_none());
}

#[test]
fn authenticated_user_cannot_revisit_login() {
    for role in ["admin", "designer", "developer", "tester"] {
        let session = session_with_role(role);
        assert_eq!(
            redirect_target(resolve("/login", &session)).as_deref(),
            Some(format!("/dashboard/{role}").as_str()),
            "{role}"
        );
    }
}
