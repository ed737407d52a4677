use pagetime::error::AppResult;

fn main() -> AppResult<()> {
    pagetime::run()
}
