use crate::error::CliError;
use crate::util::*;
use arith_codec::pipeline::decompress;
use arith_codec::CodecSettingsBuilder;
use arith_codec_common::grid::GridLayout;
use argh::FromArgs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(FromArgs, Debug)]
/// Decompress an image back to a raw PPM
#[argh(subcommand, name = "decompress")]
pub struct DecompressCmd {
    /// compressed input file; standard input when omitted or `-`
    #[argh(positional)]
    pub input: Option<PathBuf>,

    /// output PPM file; standard output when omitted or `-`
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// in-memory pixel layout (plain, blocked) [default: blocked]
    #[argh(option, default = "GridLayout::Blocked", from_str_fn(parse_layout))]
    pub layout: GridLayout,

    /// log each pipeline stage
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

pub fn handle_decompress_command(cmd: DecompressCmd) -> Result<(), CliError> {
    init_logging(cmd.verbose);
    let settings = CodecSettingsBuilder::new().pixel_layout(cmd.layout).build();
    let input = path_or_std(cmd.input);
    let output = path_or_std(cmd.output);

    let start = Instant::now();
    let (input_len, ppm) = with_input(input.as_deref(), |bytes| {
        let mut ppm = Vec::new();
        decompress(bytes, &mut ppm, &settings)?;
        Ok((bytes.len(), ppm))
    })?;

    write_output(output.as_deref(), &ppm)?;
    log_summary("decompress", input_len, ppm.len(), start.elapsed());
    Ok(())
}
