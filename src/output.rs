//! Rendering of an assembled header for the supported output targets.

use crate::header::{HeaderValue, OutputMode};

/// Renders the header as a plain header line or as web server configuration.
///
/// The header value itself is left untouched; nginx receives it single-quoted,
/// Apache double-quoted with every inner `"` escaped.
pub fn render(header: &HeaderValue, mode: OutputMode) -> String {
    match mode {
        OutputMode::Plain => header.to_string(),
        OutputMode::Nginx => format!("add_header {} '{}';", header.name(), header.directives()),
        OutputMode::Apache => format!(
            "Header always set {} \"{}\"",
            header.name(),
            header.directives().replace('"', "\\\"")
        ),
    }
}

/// Frames a rendered line for printing.
///
/// Quiet output is the line alone; otherwise it is surrounded by short
/// instructions for where it goes.
pub fn frame(rendered: &str, mode: OutputMode, quiet: bool) -> String {
    if quiet {
        return format!("{rendered}\n");
    }

    let intro = match mode {
        OutputMode::Plain => "Send the following HTTP response header over HTTPS:",
        OutputMode::Nginx => "Add the following line to the nginx server block:",
        OutputMode::Apache => "Add the following line to the Apache virtual host:",
    };
    format!(
        "{intro}\n\
         \n\
         {rendered}\n\
         \n\
         Keep the backup key offline and out of production. Clients that cached\n\
         these pins refuse any certificate chain that matches none of them\n\
         until max-age has expired.\n"
    )
}
