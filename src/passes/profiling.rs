//! Profiling annotations for the kutimer timing library
//!
//! Trailing comments with fixed six-character fields turn into `-call` markers,
//! which the subsidiary-call pass later joins onto the statement:
//!
//! ```text
//!                        !{  main}{{STT}}  =>                        -call kutimer__start('  main')
//! call fluid.create(lat) !{  main}{flu cr}  =>  call fluid.create(lat) -call kutimer__('  main','flu cr')
//! do loop = 1 , loop_max !{{count}}         =>  do loop = 1 , loop_max -call kutimer__count
//! call fluid.finalize    !{  main}{{END}}  =>  call fluid.finalize    -call kutimer__end('  main')
//!                        !{{print}}         =>                        -call kutimer__print
//! ```

use crate::parser::patterns::{
    PROFILE_CALL_RE, PROFILE_COUNT_RE, PROFILE_END_RE, PROFILE_PRINT_RE, PROFILE_START_RE,
};

/// Rewrite a profiling annotation into a `-call kutimer__...` marker
///
/// The forms are tried in a fixed order and the first match wins.
#[must_use]
pub fn expand_profiling(line: &str) -> Option<String> {
    if let Some(caps) = PROFILE_START_RE.captures(line) {
        return Some(format!("{} -call kutimer__start('{}')", &caps[1], &caps[2]));
    }
    if let Some(caps) = PROFILE_END_RE.captures(line) {
        return Some(format!("{} -call kutimer__end('{}')", &caps[1], &caps[2]));
    }
    if let Some(caps) = PROFILE_COUNT_RE.captures(line) {
        return Some(format!("{} -call kutimer__count", &caps[1]));
    }
    if let Some(caps) = PROFILE_PRINT_RE.captures(line) {
        return Some(format!("{} -call kutimer__print", &caps[1]));
    }
    if let Some(caps) = PROFILE_CALL_RE.captures(line) {
        return Some(format!(
            "{} -call kutimer__('{}','{}')",
            &caps[1], &caps[2], &caps[3]
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_start_and_end() {
        assert_eq!(
            expand_profiling("                       !{  main}{{STT}}").as_deref(),
            Some("                       -call kutimer__start('  main')")
        );
        assert_eq!(
            expand_profiling("call fluid%finalize    !{  main}{{END}}").as_deref(),
            Some("call fluid%finalize    -call kutimer__end('  main')")
        );
    }

    #[test]
    fn test_labeled_call() {
        assert_eq!(
            expand_profiling("call fluid%create(lat) !{  main}{flu cr}").as_deref(),
            Some("call fluid%create(lat) -call kutimer__('  main','flu cr')")
        );
    }

    #[test]
    fn test_count_and_print() {
        assert_eq!(
            expand_profiling("do loop = 1 , loop_max !{{count}}").as_deref(),
            Some("do loop = 1 , loop_max -call kutimer__count")
        );
        assert_eq!(
            expand_profiling("   !{{print}}").as_deref(),
            Some("   -call kutimer__print")
        );
    }

    #[test]
    fn test_field_width_is_fixed() {
        assert_eq!(expand_profiling("x = 1 !{main}{{STT}}"), None);
        assert_eq!(expand_profiling("x = 1 !{  main}{cr}"), None);
    }

    #[test]
    fn test_plain_comment_untouched() {
        assert_eq!(expand_profiling("x = 1 ! {{count}} is not a marker"), None);
        assert_eq!(expand_profiling("x = 1"), None);
    }
}
