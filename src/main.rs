//! campusctl main entrypoint.

use campusctl::run;
use campusctl::ui::messages::describe_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", describe_error(&e));
        std::process::exit(1);
    }
}
