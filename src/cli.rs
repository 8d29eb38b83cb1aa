use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(help = "The source XSD file")]
    pub input: PathBuf,

    #[clap(long, help = "Logical schema name, used as the protobuf package")]
    pub name: String,

    #[clap(
        long,
        default_value = "proto",
        help = "Directory the .proto files are written to"
    )]
    pub out: PathBuf,

    #[clap(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,
}
