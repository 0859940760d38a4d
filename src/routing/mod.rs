// Route table and navigation guard. Every navigation resolves to either an
// allowed page (with its document title and screen-reader announcement) or a
// redirect target, decided from the session alone.

use crate::session::Session;
use crate::types::role_display_name;

pub const APP_TITLE: &str = "Guide för webbtillgänglighet";

const LOGIN_PATH: &str = "/login";
const UNAUTHORIZED_PATH: &str = "/unauthorized";
const NOT_FOUND_TITLE: &str = "Sidan hittades inte";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    GuestOnly,
    Authenticated,
    Roles(&'static [&'static str]),
}

struct Route {
    path: &'static str,
    title: &'static str,
    access: Access,
}

// Admin is listed explicitly on every dashboard it may enter; the guard
// itself has no admin special case. Dashboard titles here are the route's
// own default; at resolve time the visitor's role takes precedence, so an
// admin sees "Administratör Dashboard" on every dashboard.
const ROUTES: &[Route] = &[
    Route { path: "/login", title: "Logga in", access: Access::GuestOnly },
    Route { path: "/status", title: "Status", access: Access::Authenticated },
    Route { path: "/unauthorized", title: "Åtkomst nekad", access: Access::Public },
    Route {
        path: "/dashboard/admin",
        title: "Administratör Dashboard",
        access: Access::Roles(&["admin"]),
    },
    Route {
        path: "/dashboard/designer",
        title: "Designer Dashboard",
        access: Access::Roles(&["designer", "admin"]),
    },
    Route {
        path: "/dashboard/developer",
        title: "Utvecklare Dashboard",
        access: Access::Roles(&["developer", "admin"]),
    },
    Route {
        path: "/dashboard/tester",
        title: "Testare Dashboard",
        access: Access::Roles(&["tester", "admin"]),
    },
];

/// Outcome of resolving a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow {
        path: String,
        /// Document title, page name suffixed with the application name.
        title: String,
        /// Text announced to assistive technology after navigation.
        announcement: String,
    },
    Redirect {
        to: String,
    },
}

fn allow(path: &str, page_title: &str) -> Navigation {
    Navigation::Allow {
        path: path.to_string(),
        title: format!("{page_title} - {APP_TITLE}"),
        announcement: format!("Navigerade till {page_title}"),
    }
}

fn redirect(to: &str) -> Navigation {
    Navigation::Redirect { to: to.to_string() }
}

/// Resolve one navigation against the session.
///
/// Checks run in order: root redirect, authentication, guest-only, role
/// access. An unknown path falls through to the not-found page, which is
/// public.
pub fn resolve(path: &str, session: &Session) -> Navigation {
    if path == "/" {
        return redirect(LOGIN_PATH);
    }

    let route = match ROUTES.iter().find(|r| r.path == path) {
        Some(route) => route,
        None => return allow(path, NOT_FOUND_TITLE),
    };

    match route.access {
        Access::Public => allow(route.path, route.title),
        Access::Authenticated => {
            if session.is_authenticated() {
                allow(route.path, route.title)
            } else {
                redirect(LOGIN_PATH)
            }
        }
        Access::GuestOnly => {
            if !session.is_authenticated() {
                return allow(route.path, route.title);
            }
            // An authenticated user lands on their own dashboard. A session
            // without a role is unusable and gets torn down instead.
            match session.role() {
                Some(role) => redirect(&format!("/dashboard/{role}")),
                None => {
                    session.logout();
                    redirect(LOGIN_PATH)
                }
            }
        }
        Access::Roles(allowed) => {
            if !session.is_authenticated() {
                return redirect(LOGIN_PATH);
            }
            match session.role() {
                Some(role) if allowed.contains(&role.as_str()) => {
                    // Titled after the signed-in role, not the target route
                    let title = format!("{} Dashboard", role_display_name(&role));
                    allow(route.path, &title)
                }
                _ => redirect(UNAUTHORIZED_PATH),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::session::MemoryStorage;
    use serde_json::json;

    fn anonymous() -> Session {
        Session::new(Box::new(MemoryStorage::new()))
    }

    fn authenticated(role: &str) -> Session {
        let session = anonymous();
        let user: User =
            serde_json::from_value(json!({ "id": "u1", "username": "anna", "role": role }))
                .unwrap();
        session.establish("tok", &user);
        session
    }

    #[test]
    fn root_redirects_to_login() {
        assert_eq!(resolve("/", &anonymous()), Navigation::Redirect { to: "/login".into() });
    }

    #[test]
    fn protected_route_requires_authentication() {
        assert_eq!(
            resolve("/dashboard/admin", &anonymous()),
            Navigation::Redirect { to: "/login".into() }
        );
        assert_eq!(
            resolve("/status", &anonymous()),
            Navigation::Redirect { to: "/login".into() }
        );
    }

    #[test]
    fn login_bounces_authenticated_user_to_their_dashboard() {
        assert_eq!(
            resolve("/login", &authenticated("designer")),
            Navigation::Redirect { to: "/dashboard/designer".into() }
        );
    }

    #[test]
    fn wrong_role_is_sent_to_unauthorized() {
        assert_eq!(
            resolve("/dashboard/admin", &authenticated("tester")),
            Navigation::Redirect { to: "/unauthorized".into() }
        );
    }

    #[test]
    fn admin_may_enter_every_dashboard() {
        let session = authenticated("admin");
        for path in [
            "/dashboard/admin",
            "/dashboard/designer",
            "/dashboard/developer",
            "/dashboard/tester",
        ] {
            assert!(matches!(resolve(path, &session), Navigation::Allow { .. }), "{path}");
        }
    }

    #[test]
    fn allowed_navigation_carries_title_and_announcement() {
        match resolve("/dashboard/developer", &authenticated("developer")) {
            Navigation::Allow { title, announcement, .. } => {
                assert_eq!(title, "Utvecklare Dashboard - Guide för webbtillgänglighet");
                assert_eq!(announcement, "Navigerade till Utvecklare Dashboard");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn dashboard_title_follows_the_visitors_role() {
        match resolve("/dashboard/designer", &authenticated("admin")) {
            Navigation::Allow { title, announcement, .. } => {
                assert_eq!(title, "Administratör Dashboard - Guide för webbtillgänglighet");
                assert_eq!(announcement, "Navigerade till Administratör Dashboard");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unknown_path_is_public_not_found() {
        match resolve("/finns-inte", &anonymous()) {
            Navigation::Allow { title, .. } => {
                assert_eq!(title, "Sidan hittades inte - Guide för webbtillgänglighet");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn roleless_session_on_login_is_torn_down() {
        let session = anonymous();
        let user: User =
            serde_json::from_value(json!({ "id": "u1", "username": "anna" })).unwrap();
        session.establish("tok", &user);

        assert_eq!(resolve("/login", &session), Navigation::Redirect { to: "/login".into() });
        assert!(!session.is_authenticated());
    }
}
