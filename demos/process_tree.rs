use std::io::Write;
use yangwalk::client;
use yangwalk::context::{Context, ContextFlags};
use yangwalk::data::{
    DataFormat, DataParserFlags, DataTree, DataValidationFlags,
};

static SEARCH_DIR: &str = "./assets/yang/";
static MODULE_NAME: &str = "turing-machine";
static DATA_PATH: &str = "./assets/data/turing-machine.xml";

fn main() -> std::io::Result<()> {
    env_logger::init();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut ctx = match Context::open(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
    {
        Ok(ctx) => ctx,
        Err(error) => {
            writeln!(out, "{}", error)?;
            client::write_error(&mut out, &error)?;
            std::process::exit(1);
        }
    };

    match ctx.get_or_load_module(MODULE_NAME, None) {
        Ok(module) => writeln!(out, "{}", module.name())?,
        Err(error) => writeln!(out, "{}", error)?,
    }

    // Parse the configuration only, failures leave an empty tree behind.
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
            DataTree::new(&ctx)
        }
    };

    let root = match dtree.reference() {
        Some(root) => root,
        None => {
            writeln!(out, "parse_path did not return any nodes")?;
            return Ok(());
        }
    };

    writeln!(out, "tree_dfs\n")?;
    client::write_tree(&mut out, &root)?;

    let Some(child) = root.children().next() else {
        return Ok(());
    };
    writeln!(
        out,
        "\nChild of {} is {}\n",
        root.schema().name(),
        child.schema().name()
    )?;

    writeln!(out, "tree_for\n")?;
    if let Some(grandchild) = child.children().next() {
        client::write_siblings(&mut out, &grandchild)?;
    }

    writeln!(out, "\nschema tree_dfs\n")?;
    client::write_schema_tree(&mut out, &root.schema())?;

    Ok(())
}
