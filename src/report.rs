// Report module - human-facing summary on stdout
//
// Shows which files were written and where the host application should
// import the theme from (CDN or the local server).

use crate::config::VERSION;
use crate::generator::Generated;
use crate::theme::{CSS_FILENAME, EXT_FILENAME};
use std::path::Path;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Where the host application should import the theme from
pub fn install_urls(generated: &Generated, host: &str, port: u16) -> Vec<(&'static str, String)> {
    match generated.descriptor.latest_url() {
        Some(ext_url) => vec![("install", ext_url)],
        None => vec![
            ("ext.json", format!("http://{}:{}/{}", host, port, EXT_FILENAME)),
            ("theme.css", format!("http://{}:{}/{}", host, port, CSS_FILENAME)),
        ],
    }
}

/// Written files with the size of what went into each
pub fn written_files(generated: &Generated) -> [(&Path, usize); 2] {
    [
        (generated.files.css.as_path(), generated.rendered.css.len()),
        (generated.files.ext_json.as_path(), generated.rendered.ext_json.len()),
    ]
}

/// Print the generation summary
pub fn print_generated(generated: &Generated, host: &str, port: u16) {
    use colors::*;

    println!();
    println!(
        "  {BOLD}{CYAN}{}{RESET} {DIM}v{}{RESET}",
        generated.descriptor.name, generated.descriptor.version
    );
    println!(
        "  {DIM}{} variable(s), {} theme{RESET}",
        generated.variables.len(),
        if generated.descriptor.is_dark { "dark" } else { "light" }
    );
    println!();
    for (path, bytes) in written_files(generated) {
        println!("  {GREEN}✓{RESET} Wrote {} {DIM}({} bytes){RESET}", path.display(), bytes);
    }
    println!();

    let urls = install_urls(generated, host, port);
    if generated.descriptor.cdn_base.is_some() {
        println!("  {DIM}Install External Package in the host application:{RESET}");
    } else {
        println!("  {DIM}Import locally (run with --serve):{RESET}");
    }
    for (label, url) in urls {
        println!("  {MAGENTA}▸{RESET} {DIM}{label}:{RESET} {BOLD}{url}{RESET}");
    }
    println!();
}

/// Print the server banner
pub fn print_serving(root: &Path, address: &str) {
    use colors::*;

    println!(
        "  {MAGENTA}▸{RESET} Serving {} at {BOLD}http://{}/{RESET} {DIM}(CORS: *, sn-theme v{VERSION}){RESET}",
        root.display(),
        address
    );
    println!("  {DIM}Press Ctrl+C to stop{RESET}");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::WrittenFiles;
    use crate::theme::{RenderedTheme, ThemeDescriptor, VariableMap};
    use std::path::PathBuf;

    fn generated(cdn: Option<&str>) -> Generated {
        Generated {
            variables: VariableMap::new(),
            descriptor: ThemeDescriptor {
                name: "T".to_string(),
                identifier: "org.example.t".to_string(),
                version: "1.0.0".to_string(),
                description: String::new(),
                cdn_base: cdn.map(str::to_string),
                marketing_url: None,
                is_dark: true,
                dock_icon: None,
            },
            rendered: RenderedTheme {
                css: ":root {\n}\n".to_string(),
                ext_json: "{}\n".to_string(),
            },
            files: WrittenFiles {
                css: PathBuf::from("dist/theme.css"),
                ext_json: PathBuf::from("dist/ext.json"),
            },
        }
    }

    #[test]
    fn test_local_install_urls() {
        let urls = install_urls(&generated(None), "localhost", 8001);
        assert_eq!(
            urls,
            vec![
                ("ext.json", "http://localhost:8001/ext.json".to_string()),
                ("theme.css", "http://localhost:8001/theme.css".to_string()),
            ]
        );
    }

    #[test]
    fn test_written_files_report_rendered_sizes() {
        let generated = generated(None);
        let files = written_files(&generated);
        assert_eq!(files[0], (Path::new("dist/theme.css"), 10));
        assert_eq!(files[1], (Path::new("dist/ext.json"), 3));
    }

    #[test]
    fn test_cdn_install_url() {
        let urls = install_urls(&generated(Some("https://cdn.example.com/dist/")), "localhost", 8001);
        assert_eq!(
            urls,
            vec![("install", "https://cdn.example.com/dist/ext.json".to_string())]
        );
    }
}
