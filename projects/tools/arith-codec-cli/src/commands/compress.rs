use crate::error::CliError;
use crate::util::*;
use arith_codec::pipeline::compress;
use arith_codec::CodecSettingsBuilder;
use arith_codec_common::grid::GridLayout;
use argh::FromArgs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(FromArgs, Debug)]
/// Compress a PPM image
#[argh(subcommand, name = "compress")]
pub struct CompressCmd {
    /// input PPM file; standard input when omitted or `-`
    #[argh(positional)]
    pub input: Option<PathBuf>,

    /// output file; standard output when omitted or `-`
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// in-memory pixel layout (plain, blocked) [default: blocked]
    #[argh(option, default = "GridLayout::Blocked", from_str_fn(parse_layout))]
    pub layout: GridLayout,

    /// log each pipeline stage
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

pub fn handle_compress_command(cmd: CompressCmd) -> Result<(), CliError> {
    init_logging(cmd.verbose);
    let settings = CodecSettingsBuilder::new().pixel_layout(cmd.layout).build();
    let input = path_or_std(cmd.input);
    let output = path_or_std(cmd.output);

    let start = Instant::now();
    let (input_len, compressed) = with_input(input.as_deref(), |bytes| {
        let mut compressed = Vec::new();
        compress(bytes, &mut compressed, &settings)?;
        Ok((bytes.len(), compressed))
    })?;

    write_output(output.as_deref(), &compressed)?;
    log_summary("compress", input_len, compressed.len(), start.elapsed());
    Ok(())
}
