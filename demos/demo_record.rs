use argshape::derive::*;
use argshape::{Flag, ProgramBuilder, ValueOption, Variadic};

#[derive(Debug, Record)]
struct Args {
    verbose: bool,
    #[record(key = "dry-run")]
    dry_run: bool,
    jobs: u32,
    target: Option<String>,
    paths: Vec<String>,
}

fn main() {
    let program = ProgramBuilder::create("demo_record", "1.0.0")
        .option(Flag::new("verbose", "Print more.").short('v'))
        .option(Flag::new("dry-run", "Only print the plan."))
        .option(ValueOption::<u32>::parsed("jobs", "Worker count.").short('j').default(4u32))
        .option(ValueOption::<String>::parsed("target", "Build target.").arg_name("TRIPLE"))
        .variadic(Variadic::new("paths"))
        .build();

    if let Err(e) = program.ensure_record::<Args>() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let command_input: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

    match program.parse_record::<Args>(tokens.as_slice()) {
        Ok(args) => println!("{args:?}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
