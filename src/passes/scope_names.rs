//! Scope-name placeholders
//!
//! Tracks the enclosing program unit names and expands three placeholders:
//! the program/module name, the routine path and the current line number.
//!
//! ```text
//! program main0
//! contains
//!   subroutine sub1(a)
//!   contains
//!     function fun2(b)
//!       print *, '__FILE__/__ROUTINE__'    ! print *, 'main0/sub1/fun2'
//!     end function fun2
//!   end subroutine sub1
//! end program main0
//! ```

use crate::config::Config;
use crate::error::Error;
use crate::parser::patterns::{
    INTERFACE_IN_RE, INTERFACE_OUT_RE, MODULE_IN_RE, MODULE_OUT_RE, PROGRAM_IN_RE,
    PROGRAM_OUT_RE, ROUTINE_IN_RE, ROUTINE_OUT_RE,
};
use crate::Result;

/// Placeholder tokens expanded by [`expand_scope_names`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub file: String,
    pub routine: String,
    pub line: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Placeholders {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            file: config.file_placeholder.clone(),
            routine: config.routine_placeholder.clone(),
            line: config.line_placeholder.clone(),
        }
    }
}

/// Names of the open program units, outermost first
#[derive(Debug, Default, Clone)]
pub struct ScopeStack {
    names: Vec<String>,
    in_interface: bool,
}

impl ScopeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn in_interface(&self) -> bool {
        self.in_interface
    }

    /// Enclosing program or module name
    #[must_use]
    pub fn unit_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// `sub` directly inside a program unit, `sub/internal` one level deeper
    #[must_use]
    pub fn routine_path(&self) -> Option<String> {
        match self.names.as_slice() {
            [_, routine] => Some(routine.clone()),
            [_, routine, internal] => Some(format!("{routine}/{internal}")),
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.names.clear();
        self.in_interface = false;
    }

    /// Interface flag and entry keywords
    fn enter(&mut self, line: &str) {
        if INTERFACE_IN_RE.is_match(line) {
            self.in_interface = true;
        }
        if INTERFACE_OUT_RE.is_match(line) {
            self.in_interface = false;
        }

        if let Some(caps) = PROGRAM_IN_RE.captures(line) {
            self.names.push(caps[1].to_string());
        } else if let Some(caps) = MODULE_IN_RE.captures(line) {
            if !self.in_interface {
                self.names.push(caps[1].to_string());
            }
        } else if let Some(caps) = ROUTINE_IN_RE.captures(line) {
            self.names.push(caps[2].to_string());
        }
    }

    /// Exit keywords; `line_no` is only used for the underflow diagnostic
    fn exit(&mut self, line: &str, line_no: usize) -> Result<()> {
        let closes = PROGRAM_OUT_RE.is_match(line)
            || MODULE_OUT_RE.is_match(line)
            || ROUTINE_OUT_RE.is_match(line);
        if closes && self.names.pop().is_none() {
            return Err(Error::ScopeUnderflow {
                line: line_no,
                text: line.trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn expand(&self, line: &str, line_no: usize, placeholders: &Placeholders) -> String {
        let mut out = line.to_string();
        if let Some(unit) = self.unit_name() {
            if out.contains(&placeholders.file) {
                out = out.replace(&placeholders.file, unit);
            }
        }
        if let Some(path) = self.routine_path() {
            if out.contains(&placeholders.routine) {
                out = out.replace(&placeholders.routine, &path);
            }
        }
        if out.contains(&placeholders.line) {
            out = out.replace(&placeholders.line, &line_no.to_string());
        }
        out
    }

    /// Process one line (1-based `line_no`)
    ///
    /// Entry keywords are applied before expansion and exit keywords after it, so an
    /// `end subroutine` line still sees its own routine name.
    pub fn process_line(
        &mut self,
        line: &str,
        line_no: usize,
        placeholders: &Placeholders,
    ) -> Result<String> {
        self.enter(line);
        let out = self.expand(line, line_no, placeholders);
        self.exit(line, line_no)?;
        Ok(out)
    }
}

/// Expand scope placeholders over the whole line sequence
///
/// `state` is reset first. Fails with [`Error::ScopeUnderflow`] when an `end`
/// statement closes more program units than were opened.
pub fn expand_scope_names(
    lines: Vec<String>,
    state: &mut ScopeStack,
    placeholders: &Placeholders,
) -> Result<Vec<String>> {
    state.clear();
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| state.process_line(line, idx + 1, placeholders))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[&str]) -> Result<Vec<String>> {
        let mut state = ScopeStack::new();
        let lines = input.iter().map(|s| (*s).to_string()).collect();
        expand_scope_names(lines, &mut state, &Placeholders::default())
    }

    #[test]
    fn test_module_routine_path() {
        let out = run(&[
            "module test_m",
            "contains",
            "subroutine test__sub",
            "print *, \"__FILE__/__ROUTINE__\"",
            "end subroutine test__sub",
            "end module test_m",
        ])
        .unwrap();
        assert_eq!(out[3], "print *, \"test_m/test__sub\"");
    }

    #[test]
    fn test_internal_procedure_path() {
        let out = run(&[
            "program main0",
            "contains",
            "  subroutine sub1(a)",
            "  contains",
            "    function fun2(b)",
            "      print *, '__FILE__/__ROUTINE__'",
            "    end function fun2",
            "    print *, '__ROUTINE__'",
            "  end subroutine sub1",
            "end program main0",
        ])
        .unwrap();
        assert_eq!(out[5], "      print *, 'main0/sub1/fun2'");
        assert_eq!(out[7], "    print *, 'sub1'");
    }

    #[test]
    fn test_end_line_sees_own_scope() {
        let out = run(&[
            "module m",
            "contains",
            "subroutine s",
            "end subroutine s ! __ROUTINE__",
            "end module m ! __FILE__ __ROUTINE__",
        ])
        .unwrap();
        assert_eq!(out[3], "end subroutine s ! s");
        assert_eq!(out[4], "end module m ! m __ROUTINE__");
    }

    #[test]
    fn test_line_placeholder_always_expands() {
        let out = run(&["! line __LINE__", "program p", "x = __LINE__"]).unwrap();
        assert_eq!(out[0], "! line 1");
        assert_eq!(out[2], "x = 3");
    }

    #[test]
    fn test_placeholders_outside_scope_stay() {
        let out = run(&["print *, '__FILE__ __ROUTINE__'"]).unwrap();
        assert_eq!(out[0], "print *, '__FILE__ __ROUTINE__'");
    }

    #[test]
    fn test_program_level_routine_placeholder_stays() {
        let out = run(&["program p", "print *, '__ROUTINE__'", "end program p"]).unwrap();
        assert_eq!(out[1], "print *, '__ROUTINE__'");
    }

    #[test]
    fn test_interface_module_procedure_not_counted() {
        let mut state = ScopeStack::new();
        let placeholders = Placeholders::default();
        let lines = [
            "module test_m",
            "  interface gen",
            "    module procedure gen_a, gen_b",
            "  end interface",
            "contains",
            "  subroutine gen_a(x)",
        ];
        for (i, line) in lines.iter().enumerate() {
            state.process_line(line, i + 1, &placeholders).unwrap();
            if i == 2 {
                assert!(state.in_interface());
                assert_eq!(state.depth(), 1);
            }
        }
        assert!(!state.in_interface());
        assert_eq!(state.names(), ["test_m", "gen_a"]);
    }

    #[test]
    fn test_interface_body_routines_balance() {
        let out = run(&[
            "module m",
            "  abstract interface",
            "    subroutine cb(x)",
            "    end subroutine cb",
            "  end interface",
            "contains",
            "  subroutine s",
            "    print *, '__ROUTINE__'",
            "  end subroutine s",
            "end module m",
        ])
        .unwrap();
        assert_eq!(out[7], "    print *, 's'");
    }

    #[test]
    fn test_end_name_is_not_checked() {
        let out = run(&[
            "module a",
            "contains",
            "subroutine s1",
            "end subroutine other",
            "print *, '__ROUTINE__ __FILE__'",
            "end module b",
        ])
        .unwrap();
        assert_eq!(out[4], "print *, '__ROUTINE__ a'");
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let out = run(&[
            "MODULE Geo",
            "CONTAINS",
            "  PURE REAL(8) FUNCTION Area(r)",
            "    ! __FILE__.__ROUTINE__",
            "  END FUNCTION",
            "END MODULE",
        ])
        .unwrap();
        assert_eq!(out[3], "    ! Geo.Area");
    }

    #[test]
    fn test_underflow_is_an_error() {
        let err = run(&["program p", "end program p", "end subroutine s"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::ScopeUnderflow {
                line: 3,
                text: "end subroutine s".to_string()
            })
        );
    }

    #[test]
    fn test_custom_placeholders() {
        let config = Config {
            file_placeholder: "<FILE>".to_string(),
            routine_placeholder: "<ROUTINE>".to_string(),
            line_placeholder: "<LINE>".to_string(),
            ..Default::default()
        };
        let mut state = ScopeStack::new();
        let lines = vec![
            "module test_m".to_string(),
            "contains".to_string(),
            "subroutine test__sub".to_string(),
            "print *, \"<FILE>/<ROUTINE>@<LINE>\"".to_string(),
        ];
        let out = expand_scope_names(lines, &mut state, &Placeholders::from_config(&config))
            .unwrap();
        assert_eq!(out[3], "print *, \"test_m/test__sub@4\"");
    }
}
