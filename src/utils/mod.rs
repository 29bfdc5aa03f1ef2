pub mod table {
    // Separator between header and body rows
    fn sep(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut s = String::from("|");
        for (cell, &w) in cells.iter().zip(widths) {
            s.push_str(&format!(" {cell:<w$} |"));
        }
        s
    }

    /// Render a simple ASCII table given headers and rows.
    ///
    /// Short rows are padded with empty cells; extra cells are ignored.
    #[must_use]
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let cols = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (c, w) in widths.iter_mut().enumerate().take(cols) {
                *w = (*w).max(row.get(c).map_or(0, String::len));
            }
        }

        let mut out = String::new();
        out.push_str(&sep(&widths));
        out.push('\n');
        let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
        out.push_str(&line(&header_cells, &widths));
        out.push('\n');
        out.push_str(&sep(&widths));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> =
                (0..cols).map(|i| row.get(i).cloned().unwrap_or_default()).collect();
            out.push_str(&line(&cells, &widths));
            out.push('\n');
        }
        out.push_str(&sep(&widths));
        out
    }

}

pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct QueryConfig {
        pub default_format: Option<String>, // "text" | "json"
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct FigureConfig {
        pub edges: Option<String>,  // "dependencies" | "keywords" | "maintainers"
        pub layout: Option<String>, // "layered"
        pub max_depth: Option<usize>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        /// Default path to the package records JSON.
        pub data: Option<String>,
        pub query: Option<QueryConfig>,
        pub figure: Option<FigureConfig>,
    }

    fn default_config_path(root: &Path) -> PathBuf {
        root.join("package-relations-explorer.toml")
    }

    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = fs::read_to_string(path).ok()?;
        toml::from_str::<Config>(&data).ok()
    }

    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Config> {
        let p = default_config_path(root);
        if p.exists() {
            load_config_at(&p)
        } else {
            None
        }
    }

}
