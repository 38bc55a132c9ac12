use yangwalk::context::{Context, ContextFlags};
use yangwalk::data::{
    Data, DataFormat, DataNodeRef, DataParserFlags, DataPrinterFlags,
    DataTree, DataValidationFlags,
};
use yangwalk::schema::{DataValue, SchemaNodeKind};

static SEARCH_DIR: &str = "./assets/yang";
static MODULE_NAME: &str = "turing-machine";
static DATA_PATH: &str = "./assets/data/turing-machine.xml";
static STATE_DATA_PATH: &str = "./assets/data/turing-machine-state.xml";

static DELTA_XPATH: &str = "/turing-machine:turing-machine/transition-function/delta";

fn create_context() -> Context {
    // Initialize context.
    let mut ctx = Context::open(
        SEARCH_DIR,
        ContextFlags::NO_YANGLIBRARY | ContextFlags::DISABLE_SEARCHDIR_CWD,
    )
    .expect("Failed to create context");

    // Load YANG modules.
    ctx.load_module(MODULE_NAME, None, &[])
        .expect("Failed to load module");

    ctx
}

// Parsing without validation keeps the tree exactly as written in the file.
fn parse_data(ctx: &Context) -> DataTree<'_> {
    DataTree::parse_path(
        ctx,
        DATA_PATH,
        DataFormat::XML,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree")
}

fn find_delta<'a, 'b>(
    dtree: &'a DataTree<'b>,
    label: &str,
) -> DataNodeRef<'a, 'b> {
    dtree
        .find_path(&format!("{}[label='{}']", DELTA_XPATH, label))
        .expect("Failed to lookup data")
        .expect("Data node not found")
}

#[test]
fn data_parse_path() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    assert!(!dtree.is_empty());
    assert_eq!(
        dtree
            .top_level()
            .map(|dnode| dnode.schema().name().to_owned())
            .collect::<Vec<_>>(),
        vec!["turing-machine"]
    );
    assert_eq!(
        dtree.reference().expect("Empty data tree").owner_module().name(),
        MODULE_NAME
    );
}

#[test]
fn data_parse_missing_file() {
    let ctx = create_context();
    assert!(DataTree::parse_path(
        &ctx,
        "./assets/data/no-such-file.xml",
        DataFormat::XML,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .is_err());
}

#[test]
fn data_parse_state_rejected() {
    let ctx = create_context();
    let error = DataTree::parse_path(
        &ctx,
        STATE_DATA_PATH,
        DataFormat::XML,
        DataParserFlags::NO_STATE,
        DataValidationFlags::NO_STATE,
    )
    .expect_err("State data accepted");
    assert!(error.msg.is_some());

    // The same file is fine when state data is allowed.
    let dtree = DataTree::parse_path(
        &ctx,
        STATE_DATA_PATH,
        DataFormat::XML,
        DataParserFlags::empty(),
        DataValidationFlags::PRESENT,
    )
    .expect("Failed to parse state data");
    let state = dtree
        .find_path("/turing-machine:turing-machine/state")
        .expect("Failed to lookup data")
        .expect("Data node not found");
    assert_eq!(state.value(), Some(DataValue::Uint16(1)));
}

#[test]
fn data_parse_empty_string() {
    let ctx = create_context();
    let dtree = DataTree::parse_string(
        &ctx,
        "",
        DataFormat::XML,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse empty data");

    assert!(dtree.is_empty());
    assert!(dtree.reference().is_none());
    assert_eq!(dtree.traverse().count(), 0);
    assert_eq!(
        dtree
            .find_xpath(DELTA_XPATH)
            .expect("Failed to lookup data")
            .count(),
        0
    );
}

#[test]
fn data_iterator_traverse() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    assert_eq!(
        dtree
            .traverse()
            .take(15)
            .map(|dnode| dnode.schema().name().to_owned())
            .collect::<Vec<String>>(),
        vec![
            "turing-machine",
            "transition-function",
            "delta",
            "label",
            "input",
            "state",
            "symbol",
            "delta",
            "label",
            "input",
            "state",
            "symbol",
            "output",
            "state",
            "symbol",
        ]
    );
}

#[test]
fn data_iterator_traverse_subtree() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);
    let dnode = find_delta(&dtree, "left summand");

    // The traversal stays inside the subtree of the starting node.
    assert_eq!(
        dnode
            .traverse()
            .map(|dnode| (dnode.schema().name().to_owned(), dnode.schema().kind()))
            .collect::<Vec<_>>(),
        vec![
            ("delta".to_owned(), SchemaNodeKind::List),
            ("label".to_owned(), SchemaNodeKind::Leaf),
            ("input".to_owned(), SchemaNodeKind::Container),
            ("state".to_owned(), SchemaNodeKind::Leaf),
            ("symbol".to_owned(), SchemaNodeKind::Leaf),
        ]
    );
}

#[test]
fn data_iterator_siblings() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);
    let dnode = find_delta(&dtree, "left summand");

    assert_eq!(
        dnode
            .inclusive_siblings()
            .map(|dnode| {
                dnode
                    .children()
                    .next()
                    .and_then(|label| label.value_canonical())
                    .expect("Missing list key")
            })
            .collect::<Vec<String>>(),
        vec![
            "left summand",
            "separator",
            "right summand",
            "right end",
            "write separator",
        ]
    );
    assert_eq!(dnode.siblings().count(), 4);
}

#[test]
fn data_iterator_ancestors() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);
    let dnode = dtree
        .find_path(&format!("{}[label='separator']/output/state", DELTA_XPATH))
        .expect("Failed to lookup data")
        .expect("Data node not found");

    assert_eq!(
        dnode
            .ancestors()
            .map(|dnode| dnode.schema().name().to_owned())
            .collect::<Vec<_>>(),
        vec!["output", "delta", "transition-function", "turing-machine"]
    );
    assert_eq!(
        dnode.ancestors().nth(1).expect("Missing ancestor").path(),
        format!("{}[label='separator']", DELTA_XPATH)
    );
}

#[test]
fn data_values() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);
    let dnode = find_delta(&dtree, "separator");

    let state = dnode
        .find_path("output/state")
        .expect("Failed to lookup data")
        .expect("Data node not found");
    assert_eq!(state.value(), Some(DataValue::Uint16(1)));
    assert_eq!(state.value_canonical(), Some("1".to_owned()));
    assert!(!state.is_default());

    let label = dnode.children().next().expect("Missing list key");
    assert_eq!(
        label.value(),
        Some(DataValue::Other("separator".to_owned()))
    );

    // Inner nodes have no value.
    assert_eq!(dnode.value(), None);
    assert_eq!(dnode.value_canonical(), None);

    let dnode = find_delta(&dtree, "right end");
    let head_move = dnode
        .find_path("output/head-move")
        .expect("Failed to lookup data")
        .expect("Data node not found");
    assert_eq!(head_move.value_canonical(), Some("left".to_owned()));
    let symbol = dnode
        .find_path("input/symbol")
        .expect("Failed to lookup data")
        .expect("Data node not found");
    assert_eq!(symbol.value_canonical(), Some(String::new()));
}

#[test]
fn data_find_xpath() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    assert_eq!(
        dtree
            .find_xpath(&format!("{}[label='left summand']/*", DELTA_XPATH))
            .expect("Failed to lookup data")
            .map(|dnode| dnode.schema().name().to_owned())
            .collect::<Vec<String>>(),
        vec!["label", "input"]
    );

    assert_eq!(
        dtree
            .find_xpath(&format!("{}/output/head-move", DELTA_XPATH))
            .expect("Failed to lookup data")
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec![
            format!("{}[label='right end']/output/head-move", DELTA_XPATH),
            format!("{}[label='write separator']/output/head-move", DELTA_XPATH),
        ]
    );
}

#[test]
fn data_find_xpath_no_match() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    let set = dtree
        .find_xpath(&format!("{}[label='no such label']", DELTA_XPATH))
        .expect("Failed to lookup data");
    assert_eq!(set.count(), 0);
}

#[test]
fn data_find_xpath_invalid() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    assert!(dtree.find_xpath("/turing-machine:turing-machine/[").is_err());
}

#[test]
fn data_find_path_missing() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    assert!(dtree
        .find_path(&format!("{}[label='no such label']", DELTA_XPATH))
        .expect("Failed to lookup data")
        .is_none());
}

#[test]
fn data_print_string() {
    let ctx = create_context();
    let dtree = DataTree::parse_path(
        &ctx,
        DATA_PATH,
        DataFormat::XML,
        DataParserFlags::NO_STATE,
        DataValidationFlags::NO_STATE | DataValidationFlags::PRESENT,
    )
    .expect("Failed to parse data tree");

    let output = dtree
        .print_string(DataFormat::JSON, DataPrinterFlags::WITH_SIBLINGS)
        .expect("Failed to print data tree");
    assert!(output.contains("\"turing-machine:turing-machine\""));
    assert!(output.contains("left summand"));

    let output = find_delta(&dtree, "separator")
        .print_string(DataFormat::XML, DataPrinterFlags::SHRINK)
        .expect("Failed to print data node");
    assert!(output.contains("<label>separator</label>"));
    assert!(!output.contains("left summand"));

    assert!(dtree
        .print_string(DataFormat::LYB, DataPrinterFlags::empty())
        .is_err());
}

#[test]
fn data_validate() {
    let ctx = create_context();
    let mut dtree = parse_data(&ctx);

    dtree
        .validate(DataValidationFlags::NO_STATE | DataValidationFlags::PRESENT)
        .expect("Failed to validate data tree");
    assert_eq!(find_delta(&dtree, "separator").children().count(), 3);
}

#[test]
fn data_validate_unique() {
    let ctx = create_context();
    // Both entries share the same input, which breaks the unique statement.
    let mut dtree = DataTree::parse_string(
        &ctx,
        r#"<turing-machine xmlns="http://example.net/turing-machine">
             <transition-function>
               <delta><label>a</label><input><state>0</state><symbol>1</symbol></input></delta>
               <delta><label>b</label><input><state>0</state><symbol>1</symbol></input></delta>
             </transition-function>
           </turing-machine>"#,
        DataFormat::XML,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree");

    let error = dtree
        .validate(DataValidationFlags::PRESENT)
        .expect_err("Duplicate unique values accepted");
    assert!(error.is_validation());
    assert!(error.msg.is_some());
}

#[test]
fn data_duplicate() {
    let ctx = create_context();
    let dtree = parse_data(&ctx);

    let dup = dtree.duplicate().expect("Failed to duplicate data tree");
    assert_eq!(
        dup.traverse().map(|dnode| dnode.path()).collect::<Vec<String>>(),
        dtree.traverse().map(|dnode| dnode.path()).collect::<Vec<String>>()
    );
    assert_eq!(
        dup.print_string(DataFormat::XML, DataPrinterFlags::WITH_SIBLINGS)
            .expect("Failed to print data tree"),
        dtree
            .print_string(DataFormat::XML, DataPrinterFlags::WITH_SIBLINGS)
            .expect("Failed to print data tree")
    );
    drop(dtree);

    // The copy outlives the original tree.
    assert_eq!(find_delta(&dup, "write separator").traverse().count(), 9);

    let empty = DataTree::new(&ctx)
        .duplicate()
        .expect("Failed to duplicate data tree");
    assert!(empty.is_empty());
}
