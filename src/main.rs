mod entry;
mod logger;

use tracestat::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
