use cov_preview_filter::AppResult;

fn main() -> AppResult<()> {
    cov_preview_filter::run()
}
