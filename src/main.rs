//! rzinesync main entrypoint.

use env_logger::Env;
use rzinesync::run;
use rzinesync::ui::messages::error;

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
