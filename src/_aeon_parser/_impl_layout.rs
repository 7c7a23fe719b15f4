use regex::Regex;

lazy_static! {
    static ref POSITION_REGEX: Regex = Regex::new(
        r"^\s*#position:(?P<var>[a-zA-Z0-9_]+):(?P<x>.+?),(?P<y>.+?)\s*$"
    )
    .unwrap();
}

/// **(internal)** Read the variable name and coordinates of a `#position` comment.
///
/// Returns `None` for any other comment. Positions with coordinates that are not valid
/// numbers are skipped.
pub(crate) fn read_position(line: &str) -> Option<(String, (f64, f64))> {
    let captures = POSITION_REGEX.captures(line)?;
    let x = captures["x"].trim().parse::<f64>();
    let y = captures["y"].trim().parse::<f64>();
    match (x, y) {
        (Ok(x), Ok(y)) => Some((captures["var"].to_string(), (x, y))),
        _ => {
            tracing::warn!(line, "Ignoring position with invalid coordinates.");
            None
        }
    }
}

/// **(internal)** Write a `#position` comment for the given variable.
pub(crate) fn write_position(variable: &str, position: (f64, f64)) -> String {
    format!("#position:{}:{},{}", variable, position.0, position.1)
}
