//! Running configuration scripts
//!
//! A script is a text of command lines, dispatched one at a time in order.
//! Blank lines and lines starting with `#` are skipped.

use std::path::Path;

use super::defaults::DEFAULTS;
use super::dispatcher::{DispatchError, Dispatcher};

#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: DispatchError,
}

fn script_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Run the built-in defaults. Any failure is a broken build and aborts
/// startup.
pub fn load_defaults(dispatcher: &mut Dispatcher) -> Result<(), ScriptError> {
    for (line, text) in script_lines(DEFAULTS) {
        dispatcher
            .dispatch(text)
            .map_err(|source| ScriptError { line, source })?;
    }
    tracing::debug!("Default configuration loaded");
    Ok(())
}

/// Run a user script. Failing lines are logged and skipped; the errors are
/// returned so the caller can show them.
pub fn run_script(dispatcher: &mut Dispatcher, text: &str) -> Vec<ScriptError> {
    let mut errors = Vec::new();
    for (line, text) in script_lines(text) {
        if let Err(source) = dispatcher.dispatch(text) {
            let error = ScriptError { line, source };
            tracing::warn!(%error, "Skipping configuration line");
            errors.push(error);
        }
    }
    errors
}

/// Run the user configuration file at `path`, if there is one.
pub fn load_config_file(
    dispatcher: &mut Dispatcher,
    path: &Path,
) -> std::io::Result<Vec<ScriptError>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No configuration file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    tracing::info!(path = %path.display(), "Loading configuration file");
    Ok(run_script(dispatcher, &text))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::input::commands::register_all;
    use crate::model::AppModel;

    fn setup() -> (Dispatcher, AppModel) {
        let model = AppModel::new();
        let mut dispatcher = Dispatcher::new();
        register_all(&mut dispatcher, &model).unwrap();
        (dispatcher, model)
    }

    #[test]
    fn user_script_skips_bad_lines() {
        let (mut d, model) = setup();
        let script = "# comment\nset center\n\nset bogus\nfrob\nset columns=title\n";
        let errors = run_script(&mut d, script);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 4);
        assert_eq!(errors[0].to_string(), "line 4: No such option: bogus");
        assert_eq!(errors[1].to_string(), "line 5: command not found: frob");

        let options = model.options.borrow();
        assert_eq!(options.bool_value("center"), Ok(true));
        assert_eq!(options.string_value("columns"), Ok("title"));
    }

    #[test]
    fn config_file_is_read_from_disk() {
        let (mut d, model) = setup();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind x quit").unwrap();
        writeln!(file, "set nosuch").unwrap();

        let errors = load_config_file(&mut d, file.path()).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(model.bindings.borrow().len(), 1);
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let (mut d, _) = setup();
        let dir = tempfile::tempdir().unwrap();
        let errors = load_config_file(&mut d, &dir.path().join("pms.conf")).unwrap();
        assert!(errors.is_empty());
    }
}
