use argshape::{Flag, ProgramBuilder, ValueOption, Variadic};

fn to_int(token: &str) -> Result<i64, String> {
    token
        .parse::<i64>()
        .map_err(|_| "This is not an int".to_string())
}

fn main() {
    let program = ProgramBuilder::create("my-app", "1.0.0")
        .option(Flag::new("bool", "this is a boolean"))
        .option(ValueOption::new("num", "this is a number", to_int))
        .option(ValueOption::new("required-num", "this is a number", to_int).required())
        .variadic(Variadic::new("positional").required())
        .build();

    match program.parse_env() {
        Ok((((((), bool), num), required_num), positional)) => {
            println!("bool: {bool}");
            println!("num: {num:?}");
            println!("required-num: {required_num}");
            println!("positional: {positional:?}");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
