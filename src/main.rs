// buildmode - derives the bundler configuration for one build invocation

use buildmode::cli::CliHandler;
use buildmode::utils::format_report;

#[tokio::main]
async fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run().await {
        eprintln!("{}", format_report(&e));
        std::process::exit(1);
    }
}
