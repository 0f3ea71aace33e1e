use probemap::options::MapOptions;
use probemap::session::Session;
use probemap::shell::{reader, ShellError};
use std::{env, error::Error, io};
use tracing_chrome::ChromeLayerBuilder;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const TRACE_FILE_VAR: &str = "PROBEMAP_TRACE_FILE";

fn main() -> Result<(), Box<dyn Error>> {
    let (chrome_layer, _guard) = match env::var(TRACE_FILE_VAR) {
        Ok(path) => {
            let (layer, guard) = ChromeLayerBuilder::new().file(path).build();
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(io::stderr))
        .with(chrome_layer)
        .init();

    let options = MapOptions::from_env()?;
    tracing::info!(capacity = options.capacity, "starting");
    let mut session = Session::new(options, io::stdout());
    let mut buffer = String::new();
    loop {
        buffer.clear();
        if io::stdin().read_line(&mut buffer)? == 0 {
            break;
        }
        match reader::read_command_line(&buffer, &mut session) {
            Ok(()) => {}
            Err(ShellError::Quit) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }
    Ok(())
}
