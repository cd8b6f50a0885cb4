//! Subsidiary calls
//!
//! ```text
//! xyz -call abc()    =>  xyz ;call abc()
//!     -call abc()    =>       call abc()
//! ```

use crate::parser::patterns::SUBSIDIARY_CALL_RE;

/// Join a trailing `-call name(...)` onto the statement before it
#[must_use]
pub fn join_subsidiary_call(line: &str) -> Option<String> {
    let caps = SUBSIDIARY_CALL_RE.captures(line)?;
    let head = &caps[1];
    let call = &caps[2];
    if head.trim().is_empty() {
        Some(format!("{head}  call {call}"))
    } else {
        Some(format!("{head} ;call {call}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_call() {
        assert_eq!(
            join_subsidiary_call("xyz -call abc()").as_deref(),
            Some("xyz ;call abc()")
        );
    }

    #[test]
    fn test_bare_call() {
        assert_eq!(
            join_subsidiary_call("    -call abc()").as_deref(),
            Some("     call abc()")
        );
    }

    #[test]
    fn test_extra_spaces_after_marker() {
        assert_eq!(
            join_subsidiary_call("x = 1 -call   kutimer__count").as_deref(),
            Some("x = 1 ;call kutimer__count")
        );
    }

    #[test]
    fn test_not_a_marker() {
        assert_eq!(join_subsidiary_call("x = a -callee"), None);
        assert_eq!(join_subsidiary_call("x = a - call"), None);
        assert_eq!(join_subsidiary_call("-call abc()"), None);
    }
}
