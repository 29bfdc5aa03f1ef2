use crate::cli::{Cli, Commands, EdgeKindArg, LayoutKindArg, OutputFormat, QueryCommands};
use crate::graph::PackageGraph;
use crate::layout::LayoutKind;
use crate::query::Query;
use crate::visualization::{EdgeKind, FigureBuilder};
use clap::CommandFactory;
use clap_complete::generate;
use std::io;
use std::path::Path;

// Graph source resolution: --graph wins, then --data, then the config
// file's `data` key.
fn load_graph(
    data: Option<&str>,
    graph_path: Option<&str>,
    config: Option<&str>,
) -> Result<PackageGraph, i32> {
    if let Some(p) = graph_path {
        return PackageGraph::load_json(Path::new(p)).map_err(|e| {
            eprintln!("Load graph failed: {e}");
            1
        });
    }
    let data_path = data.map(str::to_string).or_else(|| {
        let cfg = match config {
            Some(p) => crate::utils::config::load_config_at(Path::new(p)),
            None => crate::utils::config::load_config_near(Path::new(".")),
        };
        cfg.and_then(|c| c.data)
    });
    let Some(data_path) = data_path else {
        eprintln!("Missing input. Provide --data <records.json> or --graph <graph.json>.");
        return Err(2);
    };
    PackageGraph::build_from_file(Path::new(&data_path)).map_err(|e| {
        eprintln!("Build failed: {e}");
        1
    })
}

fn resolve_format(config: Option<&str>, format: OutputFormat) -> OutputFormat {
    let Some(cfg_path) = config else { return format };
    let Some(cfg) = crate::utils::config::load_config_at(Path::new(cfg_path)) else {
        return format;
    };
    match cfg.query.and_then(|q| q.default_format).as_deref() {
        Some("json") => OutputFormat::Json,
        Some("text") => OutputFormat::Text,
        _ => format,
    }
}

fn page<T>(rows: &[T], offset: usize, limit: Option<usize>) -> &[T] {
    let start = offset.min(rows.len());
    let end = match limit {
        Some(l) => (start + l).min(rows.len()),
        None => rows.len(),
    };
    &rows[start..end]
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(e) => {
            eprintln!("JSON encode error: {e}");
            1
        }
    }
}

// Text tables gain Version and Description columns at -v and above.
fn print_name_list(
    graph: &PackageGraph,
    names: &[String],
    start: usize,
    fmt: OutputFormat,
    verbose: u8,
) -> i32 {
    if matches!(fmt, OutputFormat::Json) {
        return print_json(&names);
    }
    let rows: Vec<Vec<String>> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut row = vec![format!("{}", start + i + 1), name.clone()];
            if verbose > 0 {
                let (version, description) = graph
                    .vertex(name)
                    .map_or_else(|| (String::new(), String::new()), |v| {
                        (v.version.clone(), v.description.clone())
                    });
                row.push(version);
                row.push(description);
            }
            row
        })
        .collect();
    let headers: &[&str] = if verbose > 0 {
        &["#", "Package", "Version", "Description"]
    } else {
        &["#", "Package"]
    };
    let table = crate::utils::table::render(headers, &rows);
    println!("{table}");
    0
}

#[derive(serde::Serialize)]
struct EdgeRow {
    from: String,
    to: String,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
}

fn edge_kind(arg: EdgeKindArg) -> EdgeKind {
    match arg {
        EdgeKindArg::Dependencies => EdgeKind::Dependencies,
        EdgeKindArg::Keywords => EdgeKind::Keywords,
        EdgeKindArg::Maintainers => EdgeKind::Maintainers,
    }
}

fn layout_kind(arg: LayoutKindArg) -> LayoutKind {
    match arg {
        LayoutKindArg::Layered => LayoutKind::Layered,
    }
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = failure, 2 = usage error).
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = crate::cli::Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            0
        }
        Commands::Build { data, config, save } => {
            let graph = match load_graph(data.as_deref(), None, config.as_deref()) {
                Ok(g) => g,
                Err(code) => return code,
            };
            if let Some(save_path) = save {
                if let Err(e) = graph.save_json(Path::new(&save_path)) {
                    eprintln!("Failed to save graph JSON {save_path}: {e}");
                    return 1;
                }
            }
            if !cli.quiet {
                println!("Graph built: {} packages", graph.len());
            }
            0
        }
        Commands::Query { query } => match query {
            QueryCommands::Deps {
                package,
                all,
                data,
                graph: graph_path,
                config,
                format,
                offset,
                limit,
            } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let names: Vec<String> = if all {
                    match crate::query::AllDependenciesQuery::new(&package).run(&graph) {
                        Ok(set) => set.into_iter().collect(),
                        Err(e) => {
                            eprintln!("Query failed: {e}");
                            return 1;
                        }
                    }
                } else {
                    match crate::query::DirectDependenciesQuery::new(&package).run(&graph) {
                        Ok(v) => v,
                        Err(e) => {
                            eprintln!("Query failed: {e}");
                            return 1;
                        }
                    }
                };
                let fmt = resolve_format(config.as_deref(), format);
                let start = offset.min(names.len());
                print_name_list(&graph, page(&names, offset, limit), start, fmt, cli.verbose)
            }
            QueryCommands::DepCount { package, direct, data, graph: graph_path, config, format } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let result = if direct {
                    crate::query::DirectDependencyCountQuery::new(&package).run(&graph)
                } else {
                    crate::query::DependencyCountQuery::new(&package).run(&graph)
                };
                let count = match result {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Query failed: {e}");
                        return 1;
                    }
                };
                let fmt = resolve_format(config.as_deref(), format);
                if matches!(fmt, OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Row {
                        package: String,
                        count: usize,
                        direct: bool,
                    }
                    print_json(&Row { package, count, direct })
                } else {
                    println!("{count}");
                    0
                }
            }
            QueryCommands::Edges {
                package,
                edges,
                max_depth,
                data,
                graph: graph_path,
                config,
                format,
                offset,
                limit,
            } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let result: Result<Vec<EdgeRow>, _> = match edges {
                    EdgeKindArg::Dependencies => {
                        crate::query::DependencyDepthEdgesQuery::new(&package).run(&graph).map(
                            |rows| {
                                rows.into_iter()
                                    .map(|(from, to, depth)| EdgeRow {
                                        from,
                                        to,
                                        depth,
                                        keyword: None,
                                    })
                                    .collect()
                            },
                        )
                    }
                    EdgeKindArg::Keywords => {
                        crate::query::KeywordRelationshipsQuery::with_depth(&package, max_depth)
                            .run(&graph)
                            .map(|rows| {
                                rows.into_iter()
                                    .map(|(from, to, depth, keyword)| EdgeRow {
                                        from,
                                        to,
                                        depth,
                                        keyword: Some(keyword),
                                    })
                                    .collect()
                            })
                    }
                    EdgeKindArg::Maintainers => {
                        crate::query::MaintainerNetworkQuery::new(&package).run(&graph).map(|rows| {
                            rows.into_iter()
                                .map(|(from, to, depth)| EdgeRow { from, to, depth, keyword: None })
                                .collect()
                        })
                    }
                };
                let rows = match result {
                    Ok(rows) => rows,
                    Err(e) => {
                        eprintln!("Query failed: {e}");
                        return 1;
                    }
                };
                let fmt = resolve_format(config.as_deref(), format);
                let slice = page(&rows, offset, limit);
                if matches!(fmt, OutputFormat::Json) {
                    print_json(&slice)
                } else {
                    let with_keyword = matches!(edges, EdgeKindArg::Keywords);
                    let body: Vec<Vec<String>> = slice
                        .iter()
                        .map(|r| {
                            let mut row =
                                vec![r.from.clone(), r.to.clone(), r.depth.to_string()];
                            if with_keyword {
                                row.push(r.keyword.clone().unwrap_or_default());
                            }
                            row
                        })
                        .collect();
                    let headers: &[&str] = if with_keyword {
                        &["From", "To", "Depth", "Keyword"]
                    } else {
                        &["From", "To", "Depth"]
                    };
                    let table = crate::utils::table::render(headers, &body);
                    println!("{table}");
                    0
                }
            }
            QueryCommands::TopDependencies { top, data, graph: graph_path, config, format } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let (names, counts) =
                    match crate::query::MostDependenciesQuery::new(top).run(&graph) {
                        Ok(r) => r,
                        Err(e) => {
                            eprintln!("Query failed: {e}");
                            return 1;
                        }
                    };
                let fmt = resolve_format(config.as_deref(), format);
                if matches!(fmt, OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Row {
                        package: String,
                        dependencies: usize,
                    }
                    let out: Vec<Row> = names
                        .into_iter()
                        .zip(counts)
                        .map(|(package, dependencies)| Row { package, dependencies })
                        .collect();
                    print_json(&out)
                } else {
                    let body: Vec<Vec<String>> = names
                        .iter()
                        .zip(&counts)
                        .map(|(name, count)| vec![name.clone(), count.to_string()])
                        .collect();
                    let table =
                        crate::utils::table::render(&["Package", "Dependencies"], &body);
                    println!("{table}");
                    0
                }
            }
            QueryCommands::TopKeywords { data, graph: graph_path, config, format, offset, limit } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let (keywords, counts) =
                    match crate::query::MostKeywordsQuery::new().run(&graph) {
                        Ok(r) => r,
                        Err(e) => {
                            eprintln!("Query failed: {e}");
                            return 1;
                        }
                    };
                let rows: Vec<(String, usize)> = keywords.into_iter().zip(counts).collect();
                let fmt = resolve_format(config.as_deref(), format);
                let slice = page(&rows, offset, limit);
                if matches!(fmt, OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Row {
                        keyword: String,
                        packages: usize,
                    }
                    let out: Vec<Row> = slice
                        .iter()
                        .map(|(keyword, packages)| Row {
                            keyword: keyword.clone(),
                            packages: *packages,
                        })
                        .collect();
                    print_json(&out)
                } else {
                    let body: Vec<Vec<String>> = slice
                        .iter()
                        .map(|(keyword, count)| vec![keyword.clone(), count.to_string()])
                        .collect();
                    let table = crate::utils::table::render(&["Keyword", "Packages"], &body);
                    println!("{table}");
                    0
                }
            }
            QueryCommands::Metadata { package, data, graph: graph_path, config, format } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let meta = match crate::query::PackageMetadataQuery::new(&package).run(&graph) {
                    Ok(m) => m,
                    Err(e) => {
                        eprintln!("Query failed: {e}");
                        return 1;
                    }
                };
                let fmt = resolve_format(config.as_deref(), format);
                if matches!(fmt, OutputFormat::Json) {
                    print_json(&meta)
                } else {
                    println!("Package: {package}");
                    println!("Keywords: {}", meta.keywords.join(", "));
                    println!("Downloads: {}", meta.downloads_count);
                    println!("Dependents: {}", meta.dependents_count);
                    println!("Quality: {}", meta.quality);
                    println!("Popularity: {}", meta.popularity);
                    println!("Maintenance: {}", meta.maintenance);
                    0
                }
            }
            QueryCommands::SharedMaintainers {
                package,
                data,
                graph: graph_path,
                config,
                format,
                offset,
                limit,
            } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let names: Vec<String> =
                    match crate::query::SharedMaintainersQuery::new(&package).run(&graph) {
                        Ok(set) => set.into_iter().collect(),
                        Err(e) => {
                            eprintln!("Query failed: {e}");
                            return 1;
                        }
                    };
                let fmt = resolve_format(config.as_deref(), format);
                let start = offset.min(names.len());
                print_name_list(&graph, page(&names, offset, limit), start, fmt, cli.verbose)
            }
            QueryCommands::Search {
                pattern,
                data,
                graph: graph_path,
                config,
                format,
                offset,
                limit,
            } => {
                let re = match regex::Regex::new(&pattern) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Invalid --pattern regex: {e}");
                        return 1;
                    }
                };
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let names = match crate::query::SearchPackagesQuery::new(re).run(&graph) {
                    Ok(v) => v,
                    Err(e) => {
                        eprintln!("Query failed: {e}");
                        return 1;
                    }
                };
                let fmt = resolve_format(config.as_deref(), format);
                let start = offset.min(names.len());
                print_name_list(&graph, page(&names, offset, limit), start, fmt, cli.verbose)
            }
            QueryCommands::Figure {
                package,
                edges,
                layout,
                max_depth,
                data,
                graph: graph_path,
                config,
                format,
            } => {
                let graph = match load_graph(data.as_deref(), graph_path.as_deref(), config.as_deref())
                {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let mut kind = edge_kind(edges);
                let mut layout = layout_kind(layout);
                let mut depth = max_depth;
                if let Some(cfg_path) = config.as_ref() {
                    if let Some(cfg) =
                        crate::utils::config::load_config_at(Path::new(cfg_path))
                    {
                        if let Some(figure) = cfg.figure {
                            match figure.edges.as_deref() {
                                Some("keywords") => kind = EdgeKind::Keywords,
                                Some("maintainers") => kind = EdgeKind::Maintainers,
                                Some("dependencies") => kind = EdgeKind::Dependencies,
                                _ => {}
                            }
                            if figure.layout.as_deref() == Some("layered") {
                                layout = LayoutKind::Layered;
                            }
                            if let Some(v) = figure.max_depth {
                                depth = v;
                            }
                        }
                    }
                }
                let builder = FigureBuilder { edges: kind, layout, max_depth: depth };
                let figure = match builder.build(&graph, &package) {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("Query failed: {e}");
                        return 1;
                    }
                };
                let fmt = resolve_format(config.as_deref(), format);
                if matches!(fmt, OutputFormat::Json) {
                    print_json(&figure)
                } else {
                    let nodes: Vec<Vec<String>> = figure
                        .nodes
                        .iter()
                        .map(|n| {
                            vec![
                                n.name.clone(),
                                format!("{:.2}", n.x),
                                format!("{:.2}", n.y),
                                format!("{:.2}", n.quality),
                            ]
                        })
                        .collect();
                    let node_table = crate::utils::table::render(
                        &["Package", "X", "Y", "Quality"],
                        &nodes,
                    );
                    println!("{node_table}");
                    let edge_rows: Vec<Vec<String>> = figure
                        .edges
                        .iter()
                        .map(|e| vec![e.from.clone(), e.to.clone(), e.depth.to_string()])
                        .collect();
                    let edge_table =
                        crate::utils::table::render(&["From", "To", "Depth"], &edge_rows);
                    println!("{edge_table}");
                    0
                }
            }
        },
    }
}
