use std::env;

fn main() -> Result<(), &'static str> {
    env_logger::init();

    let path = env::args().nth(1).ok_or("usage: pytme <file.pyt>")?;

    // Only files whose last four characters spell `.pyt`, case-insensitively,
    // are accepted.
    if !path.to_lowercase().ends_with(".pyt") {
        println!("Invalid filetype");
        return Err("invalid filetype");
    }

    let source = pytme::source::file(&path).map_err(|_| "no file found at the given address")?;
    pytme::run(source)
}
