use anyhow::Result;
use console::{Term, style};
use dcfetch::Config;
use dcfetch::download::http_client;
use dcfetch::resolver::build_resolver;
use std::process;

pub async fn handle_resolve(config: &Config, urls: &[String]) -> Result<()> {
    let term = Term::stdout();
    let resolver = build_resolver(config, http_client(&config.http)?)?;

    let mut error_count = 0;
    for url in urls {
        // The redirect strategy has already fetched the body; it is dropped here
        match resolver.resolve(url).await {
            Ok(resolution) => {
                term.write_line(&format!(
                    "{} {} {}",
                    url,
                    style("→").dim(),
                    style(resolution.url()).green()
                ))?;
            }
            Err(e) => {
                term.write_line(&format!("{} {}", style("❌").red(), e))?;
                error_count += 1;
            }
        }
    }

    if error_count > 0 {
        process::exit(1);
    }

    Ok(())
}
