mod damson;

use std::{env, io};

use damson::*;

/*----------------------------------------------------------------*/

fn main() {
    let mut buffer = String::new();
    let mut engine = Engine::new();
    let args = env::args().skip(1).collect::<Vec<String>>();

    if !args.is_empty() {
        for cmd in args {
            let cmd = cmd.trim();
            engine.input(cmd, cmd.len());
        }

        return;
    }

    println!("Damson v{}", ENGINE_VERSION);
    while let Ok(bytes) = io::stdin().read_line(&mut buffer) {
        if !engine.input(buffer.trim(), bytes) {
            break;
        }

        buffer.clear();
    }
}
