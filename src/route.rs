use crate::error::{AppError, Result};
use crate::models::NavigationPayload;

const ENTRY_PATH: &str = "entry";
const SUMMARY_PATH: &str = "summary";

/// A navigation destination. Parameters travel typed; string path
/// segments exist only at the encode/decode boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Entry,
    Summary { budget: f64, total_expenses: f64 },
}

impl Route {
    pub fn summary(payload: NavigationPayload) -> Self {
        Self::Summary {
            budget: payload.budget,
            total_expenses: payload.total_expenses,
        }
    }

    /// Encode as a path with numbers as decimal segments.
    pub fn path(&self) -> String {
        match self {
            Self::Entry => ENTRY_PATH.to_string(),
            Self::Summary {
                budget,
                total_expenses,
            } => format!("{SUMMARY_PATH}/{budget}/{total_expenses}"),
        }
    }

    /// Decode a path back into a route. Missing or malformed numeric
    /// segments decode as zero; an unrecognized root is an error.
    pub fn from_path(path: &str) -> Result<Self> {
        let mut segments = path.split('/');
        match segments.next() {
            Some(ENTRY_PATH) => Ok(Self::Entry),
            Some(SUMMARY_PATH) => Ok(Self::Summary {
                budget: parse_segment(segments.next()),
                total_expenses: parse_segment(segments.next()),
            }),
            _ => Err(AppError::UnknownRoute(path.to_string())),
        }
    }
}

fn parse_segment(segment: Option<&str>) -> f64 {
    segment.and_then(|s| s.parse().ok()).unwrap_or(0.0)
}

/// The route stack. A pure dispatch table plus the stack itself; no
/// payload survives a pop.
#[derive(Debug)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Entry],
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Entry)
    }

    /// Push the destination a path decodes to.
    pub fn navigate_path(&mut self, path: &str) -> Result<Route> {
        let route = Route::from_path(path)?;
        self.stack.push(route);
        Ok(route)
    }

    /// Forward navigation always goes through the encoded form.
    pub fn navigate(&mut self, route: Route) -> Result<Route> {
        self.navigate_path(&route.path())
    }

    /// Unwind to the previous route, discarding the current payload.
    /// Returns false when already at the start route.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_summary() {
        let route = Route::Summary {
            budget: 1000.0,
            total_expenses: 450.0,
        };
        assert_eq!(route.path(), "summary/1000/450");
    }

    #[test]
    fn test_encode_fractional_segments() {
        let route = Route::Summary {
            budget: 42.5,
            total_expenses: 0.25,
        };
        assert_eq!(route.path(), "summary/42.5/0.25");
    }

    #[test]
    fn test_round_trip() {
        for (budget, total_expenses) in [(1000.0, 450.0), (42.5, 0.25), (0.0, 20.0), (-5.5, 1.0)] {
            let route = Route::Summary {
                budget,
                total_expenses,
            };
            assert_eq!(Route::from_path(&route.path()).unwrap(), route);
        }
        assert_eq!(Route::from_path("entry").unwrap(), Route::Entry);
    }

    #[test]
    fn test_decode_defaults_missing_segments_to_zero() {
        assert_eq!(
            Route::from_path("summary").unwrap(),
            Route::Summary {
                budget: 0.0,
                total_expenses: 0.0
            }
        );
        assert_eq!(
            Route::from_path("summary/1000").unwrap(),
            Route::Summary {
                budget: 1000.0,
                total_expenses: 0.0
            }
        );
    }

    #[test]
    fn test_decode_defaults_malformed_segments_to_zero() {
        assert_eq!(
            Route::from_path("summary/abc/5").unwrap(),
            Route::Summary {
                budget: 0.0,
                total_expenses: 5.0
            }
        );
    }

    #[test]
    fn test_unknown_route_root_is_an_error() {
        assert!(matches!(
            Route::from_path("settings/1/2"),
            Err(AppError::UnknownRoute(_))
        ));
        assert!(Route::from_path("").is_err());
    }

    #[test]
    fn test_router_starts_on_entry() {
        assert_eq!(Router::new().current(), Route::Entry);
    }

    #[test]
    fn test_router_navigate_and_back() {
        let mut router = Router::new();
        let route = Route::Summary {
            budget: 100.0,
            total_expenses: 150.0,
        };
        assert_eq!(router.navigate(route).unwrap(), route);
        assert_eq!(router.current(), route);

        assert!(router.back());
        assert_eq!(router.current(), Route::Entry);
    }

    #[test]
    fn test_router_back_stops_at_start_route() {
        let mut router = Router::new();
        assert!(!router.back());
        assert_eq!(router.current(), Route::Entry);
    }
}
