use std::process::ExitCode;

fn main() -> ExitCode {
    match sales_eda::app::run_sales_analysis(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
