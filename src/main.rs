//! rPaycheck main entrypoint.

use rpaycheck::run;
use rpaycheck::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
