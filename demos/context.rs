use std::io::Write;
use yangwalk::client;
use yangwalk::context::{Context, ContextFlags};

static SEARCH_DIR: &str = "./assets/yang/";
static MISSING_DIR: &str = "./assets/no-such-dir/";
static MODULE_NAME: &str = "turing-machine";

fn main() -> std::io::Result<()> {
    env_logger::init();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // A context can't be created on a directory that doesn't exist.
    if let Err(error) = Context::open(MISSING_DIR, ContextFlags::NO_YANGLIBRARY)
    {
        writeln!(out, "{}", error)?;
        client::write_error(&mut out, &error)?;
    }

    let mut ctx = match Context::open(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
    {
        Ok(ctx) => ctx,
        Err(error) => {
            writeln!(out, "{}", error)?;
            std::process::exit(1);
        }
    };
    ctx.init_default_logger()
        .expect("Failed to install libyang logger");

    // Search directories, as stored by libyang.
    client::write_searchdirs(&mut out, &ctx)?;
    writeln!(out)?;

    // Look the module up, loading it if needed.
    match ctx.get_or_load_module(MODULE_NAME, None) {
        Ok(module) => writeln!(out, "{}", module.name())?,
        Err(error) => {
            writeln!(out, "{}", error)?;
            client::write_error(&mut out, &error)?;
        }
    }

    // All modules present in the context, internal ones included.
    client::write_modules(&mut out, &ctx)?;

    Ok(())
}
