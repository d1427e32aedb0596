use std::{error::Error, io::Read};

use dexopt_params::{DexoptParams, ReasonMapping};

// decodes a wire payload from stdin and dumps it
pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut payload = Vec::new();
    std::io::stdin().read_to_end(&mut payload)?;

    let params = DexoptParams::from_wire_format(&payload)?;
    println!("{:#?}", params);

    let mapping = ReasonMapping::default();
    println!(
        "effective compiler filter: {:?}",
        params.effective_compiler_filter(&mapping)
    );
    println!(
        "effective priority class: {:?}",
        params.effective_priority_class(&mapping)
    );

    match params.validate() {
        Ok(()) => println!("valid"),
        Err(e) => println!("invalid: {e}"),
    }
    Ok(())
}
