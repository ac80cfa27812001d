//! rosterctl main entrypoint.

use rosterctl::run;
use rosterctl::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
