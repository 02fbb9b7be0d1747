use argshape::{Flag, ProgramBuilder, Variadic};

fn main() {
    let program = ProgramBuilder::create("summer", "1.0.0")
        .about("Sum the items.")
        .option(Flag::new("verbose", "Print each item.").short('v'))
        .variadic(Variadic::new("item").required())
        .build();

    let (((), verbose), items) = program.parse_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let mut sum: u32 = 0;

    for item in items {
        match item.parse::<u32>() {
            Ok(value) => {
                if verbose {
                    println!("+ {value}");
                }
                sum += value;
            }
            Err(_) => {
                eprintln!("'{item}' cannot convert to u32.");
                std::process::exit(1);
            }
        }
    }

    println!("Sum: {sum}");
}
