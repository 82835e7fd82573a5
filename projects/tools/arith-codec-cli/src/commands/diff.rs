use crate::error::CliError;
use crate::util::*;
use arith_codec::diff::rms_difference;
use arith_codec::ppm::read_ppm;
use arith_codec::{CodecError, Image};
use arith_codec_common::grid::GridLayout;
use argh::FromArgs;
use std::path::{Path, PathBuf};

#[derive(FromArgs, Debug)]
/// Print the root mean square difference of two PPM images
#[argh(subcommand, name = "diff")]
pub struct DiffCmd {
    /// first PPM file; `-` reads standard input
    #[argh(positional)]
    pub first: PathBuf,

    /// second PPM file; `-` reads standard input
    #[argh(positional)]
    pub second: PathBuf,

    /// log debug output
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

pub fn handle_diff_command(cmd: DiffCmd) -> Result<(), CliError> {
    init_logging(cmd.verbose);
    let first = path_or_std(Some(cmd.first));
    let second = path_or_std(Some(cmd.second));
    if first.is_none() && second.is_none() {
        return Err(CliError::BothInputsStdin);
    }

    let first = read_image(first.as_deref())?;
    let second = read_image(second.as_deref())?;

    match rms_difference(&first, &second) {
        Ok(difference) => {
            println!("{difference:.4}");
            Ok(())
        }
        Err(error @ CodecError::DimensionMismatch { .. }) => {
            println!("1.0");
            Err(error.into())
        }
        Err(error) => Err(error.into()),
    }
}

fn read_image(path: Option<&Path>) -> Result<Image, CliError> {
    with_input(path, |mut bytes| Ok(read_ppm(&mut bytes, GridLayout::Plain)?))
}
