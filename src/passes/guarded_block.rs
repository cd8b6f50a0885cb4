//! Guarded blocks: `just_once` regions and `skip` counters
//!
//! ```text
//! ==<just_once>==          =>  if (just_once) then
//! ==</just_once>==         =>  just_once = .false. ; end if
//!
//! ===<skip ctr:8>===       =>  if(mod(ctr,8)==0) then
//! ===</skip ctr>===        =>  end if; ctr = ctr + 1
//! ```
//!
//! The markers are matched line by line; nothing checks that an opening marker
//! has a matching close.

use crate::parser::patterns::{JUST_ONCE_BEGIN_RE, JUST_ONCE_END_RE, SKIP_BEGIN_RE, SKIP_END_RE};

/// Rewrite a `just_once` marker line
#[must_use]
pub fn expand_just_once(line: &str) -> Option<String> {
    if let Some(caps) = JUST_ONCE_BEGIN_RE.captures(line) {
        return Some(format!("{}if (just_once) then{}", &caps[1], &caps[2]));
    }
    if let Some(caps) = JUST_ONCE_END_RE.captures(line) {
        return Some(format!(
            "{}just_once = .false. ; end if{}",
            &caps[1], &caps[2]
        ));
    }
    None
}

/// Rewrite a `skip <counter>:<n>` marker line
#[must_use]
pub fn expand_skip_counter(line: &str) -> Option<String> {
    if let Some(caps) = SKIP_BEGIN_RE.captures(line) {
        return Some(format!(
            "{}if(mod({},{})==0) then{}",
            &caps[1], &caps[2], &caps[3], &caps[4]
        ));
    }
    if let Some(caps) = SKIP_END_RE.captures(line) {
        let counter = &caps[2];
        return Some(format!(
            "{}end if; {counter} = {counter} + 1{}",
            &caps[1], &caps[3]
        ));
    }
    None
}
