use clap::Parser;
use docmap::{CrawlSnapshot, DocMap, DocMapper, MapperConfig};
use std::collections::HashSet;
use std::process::ExitCode;

mod args;
use args::{Args, convert_parser};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> docmap::Result<()> {
    ::log::info!("Loading crawl snapshot {}", args.snapshot.display());
    let snapshot = CrawlSnapshot::from_file(&args.snapshot)?;

    let mut config = match &args.config {
        Some(path) => MapperConfig::from_file(path)?,
        None => MapperConfig::default(),
    };
    if let Some(parser) = convert_parser(args.parser) {
        config.parser = Some(parser);
    }
    if !args.sections.is_empty() {
        config.sections = args.sections.clone();
    }

    let map = build(snapshot, config)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&map)?
    } else {
        serde_json::to_string(&map)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            ::log::info!("Wrote documentation map to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn build(snapshot: CrawlSnapshot, config: MapperConfig) -> docmap::Result<DocMap> {
    let mut mapper = DocMapper::new(&snapshot.root_url)?.with_config(config)?;

    match snapshot.root_page() {
        Some(root) => mapper = mapper.with_navigation_from(&root.html)?,
        None => ::log::warn!("Snapshot has no pages, mapping without navigation"),
    }

    // Restrict to the requested sections, keeping the root page itself
    let scope: Option<HashSet<String>> = if mapper.config().sections.is_empty() {
        None
    } else {
        let mut urls: HashSet<String> = mapper
            .scoped_urls()
            .iter()
            .map(|u| docmap::filter::normalize(u).to_string())
            .collect();
        urls.insert(docmap::filter::normalize(mapper.root_url()).to_string());
        Some(urls)
    };

    let mut session = mapper.start();
    let mut pages_processed = 0;

    for result in snapshot.pages {
        if let Some(scope) = &scope {
            if !scope.contains(docmap::filter::normalize(&result.url)) {
                ::log::debug!("Out of scope: {}", result.url);
                continue;
            }
        }

        let url = result.url.clone();
        let section = session.add_fetch(result).map(str::to_string);
        pages_processed += 1;
        ::log::info!("Processed page {}: {} -> {:?}", pages_processed, url, section);
    }

    Ok(session.finish())
}
