use marc21::encoding::EncodingPolicy;
use marc21::record::is_control_tag;
use marc21::{ReadOptions, Record, RecordReader};
use std::env;
use std::process;

const HELP_TEXT: &str = r#"
Read binary MARC21 files and print their contents to STDOUT.

Synopsis:

marc-dump --tag 245 --subfield a records.mrc

Parameters:

    --tag <pattern>
        Print only fields whose tag matches the pattern.  'x' matches
        any character and multiple patterns may be joined with ':',
        e.g. "245:6xx".

    --subfield <code>
        With --tag, print only the values of this subfield.

    --count
        Print only the number of records read from each file.

    --no-validate
        Accept records whose leader breaks the MARC21 value rules.

    --unknown-encoding <reject|utf8> [default="reject"]
        What to do with records whose leader declares a character
        encoding other than MARC-8 (' ') or UTF-8 ('a').  With "utf8"
        such records are read as UTF-8 even when leader validation is on.

    --strict-directory
        Reject records whose directory points outside the record.

    --verbose
        Log at debug level unless RUST_LOG says otherwise.

    --help
"#;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut opts = getopts::Options::new();

    opts.optopt("", "tag", "", "");
    opts.optopt("", "subfield", "", "");
    opts.optopt("", "unknown-encoding", "", "");
    opts.optflag("", "count", "");
    opts.optflag("", "no-validate", "");
    opts.optflag("", "strict-directory", "");
    opts.optflag("", "verbose", "");
    opts.optflag("h", "help", "");

    let params = match opts.parse(&args[1..]) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}\n{HELP_TEXT}");
            process::exit(2);
        }
    };

    if params.opt_present("help") {
        println!("{HELP_TEXT}");
        return;
    }

    let verbose = params.opt_present("verbose");

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    let mut options = ReadOptions::new();
    options
        .set_validate_leader(!params.opt_present("no-validate"))
        .set_strict_directory(params.opt_present("strict-directory"))
        .set_verbose(verbose);

    match params.opt_str("unknown-encoding").as_deref() {
        None | Some("reject") => {}
        Some("utf8") => {
            options.set_unknown_encoding(EncodingPolicy::FallbackUtf8);
        }
        Some(other) => {
            eprintln!("Invalid --unknown-encoding value: {other}");
            process::exit(2);
        }
    }

    if params.free.is_empty() {
        eprintln!("MARC file name required\n{HELP_TEXT}");
        process::exit(2);
    }

    let tag = params.opt_str("tag");
    let subfield = params.opt_str("subfield");
    let count_only = params.opt_present("count");

    let mut failed = false;

    for filename in &params.free {
        let mut reader = match RecordReader::from_file(filename) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{e}");
                failed = true;
                continue;
            }
        };

        reader.set_options(options.clone());

        let mut count = 0;
        let mut errors = 0;

        for record in reader {
            let record = match record {
                Ok(r) => r,
                Err(_) => {
                    // Already logged by the reader.
                    errors += 1;
                    continue;
                }
            };

            count += 1;

            if count_only {
                continue;
            }

            match tag.as_deref() {
                Some(t) => print_fields(&record, t, subfield.as_deref()),
                None => println!("{}\n", record.to_breaker()),
            }
        }

        if count_only {
            println!("{filename}: {count}");
        }

        if errors > 0 {
            log::warn!("{filename}: {errors} record(s) could not be read");
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}

/// Print fields matching a tag pattern, or just one subfield's values.
fn print_fields(record: &Record, pattern: &str, subfield: Option<&str>) {
    for tag in record.matching_tags(pattern) {
        if let Some(code) = subfield {
            if is_control_tag(tag) {
                continue;
            }
            match record.get_values(tag, code) {
                Ok(values) => values.iter().for_each(|v| println!("{v}")),
                Err(e) => log::warn!("{e}"),
            }
            continue;
        }

        let field = record.raw_field(tag);
        for idx in 0..field.value_count() {
            if let Some(line) = field.to_breaker(idx) {
                println!("{line}");
            }
        }
    }
}
