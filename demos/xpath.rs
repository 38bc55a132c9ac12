use std::io::Write;
use yangwalk::client;
use yangwalk::context::{Context, ContextFlags};
use yangwalk::data::{
    Data, DataFormat, DataParserFlags, DataTree, DataValidationFlags,
};

static SEARCH_DIR: &str = "./assets/yang/";
static MODULE_NAME: &str = "turing-machine";
static DATA_PATH: &str = "./assets/data/turing-machine.xml";
static XPATH: &str = "/turing-machine:turing-machine/transition-function/delta[label='left summand']/*";

fn main() -> std::io::Result<()> {
    env_logger::init();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Every failure ends the program.
    let mut ctx = match Context::open(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
    {
        Ok(ctx) => ctx,
        Err(error) => {
            writeln!(out, "{}", error)?;
            std::process::exit(1);
        }
    };

    if let Err(error) = ctx.load_module(MODULE_NAME, None, &[]) {
        writeln!(out, "module not loaded: {}", error)?;
        std::process::exit(1);
    }

    let dtree = match DataTree::parse_path(
        &ctx,
        DATA_PATH,
        DataFormat::XML,
        DataParserFlags::NO_STATE,
        DataValidationFlags::NO_STATE | DataValidationFlags::PRESENT,
    ) {
        Ok(dtree) => dtree,
        Err(error) => {
            writeln!(out, "{}", error)?;
            std::process::exit(1);
        }
    };

    let set = match dtree.find_xpath(XPATH) {
        Ok(set) => set,
        Err(error) => {
            writeln!(out, "{}", error)?;
            client::write_error(&mut out, &error)?;
            std::process::exit(1);
        }
    };
    if client::write_node_set(&mut out, set)? == 0 {
        writeln!(out, "could not find data for xpath")?;
        std::process::exit(1);
    }

    Ok(())
}
