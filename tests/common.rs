#![allow(dead_code)]

use std::{error::Error, fmt::Write};

use dexopt_params::{reason, Builder, DexoptFlags, DexoptParams};
use lazy_static::lazy_static;

pub type Result<T = ()> = std::result::Result<T, Box<dyn Error>>;

pub fn init_logger() {
    // ensure the logger was init
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

pub fn hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(if i % 16 == 0 { '\n' } else { ' ' });
        }
        write!(s, "{b:02x}").unwrap();
    }
    s
}

fn build(builder: &mut Builder) -> DexoptParams {
    builder.build().expect("fixture params must be valid")
}

lazy_static! {
    /// A spread of valid params covering every optional field being set or
    /// unset.
    pub static ref VALID_PARAMS: Vec<DexoptParams> = vec![
        build(&mut Builder::new(reason::INSTALL).unwrap()),
        build(&mut Builder::new(reason::VDEX).unwrap()),
        build(Builder::new(reason::CUSTOM)
            .unwrap()
            .set_compiler_filter("speed")
            .set_priority_class(90)),
        build(Builder::new(reason::BG_DEXOPT)
            .unwrap()
            .set_flags(
                DexoptFlags::ON_PRIMARY_DEX
                    | DexoptFlags::ON_SECONDARY_DEX
                    | DexoptFlags::SHOULD_INCLUDE_DEPENDENCIES
            )
            .set_priority_class(0)),
        build(Builder::new(reason::INSTALL)
            .unwrap()
            .set_flags(
                DexoptFlags::ON_PRIMARY_DEX | DexoptFlags::FOR_SINGLE_SPLIT | DexoptFlags::FORCE
            )
            .set_split_name("split_0")
            .set_compiler_filter("everything-profile")
            .set_priority_class(100)),
        build(Builder::new("some-other-caller")
            .unwrap()
            .set_flags(DexoptFlags::empty())
            .set_compiler_filter("assume-verified")),
        build(Builder::new(reason::CMDLINE)
            .unwrap()
            .set_flags(DexoptFlags::all() - DexoptFlags::FOR_SINGLE_SPLIT)),
        build(Builder::new("\u{1F600} with a NUL \0")
            .unwrap()
            .set_flags(DexoptFlags::ON_PRIMARY_DEX | DexoptFlags::FOR_SINGLE_SPLIT)
            .set_split_name("split_\u{e9}")),
    ];
}
