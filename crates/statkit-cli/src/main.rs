use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use statkit_cli::commands::ols::{run_ols, OlsParams};
use statkit_cli::commands::ttest::{run_one_sample, run_two_sample, OneSampleParams, TwoSampleParams};
use statkit_cli::input::RunConfig;

fn data_arg() -> Arg {
    Arg::new("data")
        .help("Path to the input data file (*.csv or *.tsv) with a header row")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .help("Path to a JSON run configuration. Command line options override it.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output_file")
        .short('o')
        .long("output")
        .help("Path of the JSON report to write")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn no_summary_arg() -> Arg {
    Arg::new("no_summary")
        .long("no-summary")
        .help("Do not print the text summary to stdout.")
        .action(ArgAction::SetTrue)
}

fn alternative_arg() -> Arg {
    Arg::new("alternative")
        .long("alternative")
        .help("Alternative hypothesis. Overrides the configuration file.")
        .value_parser(["unequal", "less", "greater"])
        .value_hint(ValueHint::Other)
}

fn alpha_arg() -> Arg {
    Arg::new("alpha")
        .long("alpha")
        .help("Significance level in [0, 1]. Overrides the configuration file.")
        .value_parser(clap::value_parser!(f64))
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("STATKIT_LOG", "error,statkit=info"))
        .init();

    let matches = Command::new("statkit")
        .version(clap::crate_version!())
        .about("Least squares regression and t-tests over tabular data")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("ols")
                .about("Fit an ordinary least squares regression")
                .arg(data_arg())
                .arg(
                    Arg::new("y")
                        .long("y")
                        .help("Dependent variable column")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("x")
                        .long("x")
                        .help(
                            "Independent variable column(s), comma separated or repeated. \
                             Defaults to every column except --y.",
                        )
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(config_arg())
                .arg(output_arg())
                .arg(no_summary_arg()),
        )
        .subcommand(
            Command::new("ttest")
                .about("Run a Student t-test")
                .subcommand_required(true)
                .subcommand(
                    Command::new("one-sample")
                        .about("Test the mean of one column against a population mean")
                        .arg(data_arg())
                        .arg(
                            Arg::new("column")
                                .short('c')
                                .long("column")
                                .help("Column holding the observations")
                                .required(true)
                                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                        )
                        .arg(
                            Arg::new("popmean")
                                .long("popmean")
                                .help("Hypothesized population mean")
                                .required(true)
                                .allow_negative_numbers(true)
                                .value_parser(clap::value_parser!(f64)),
                        )
                        .arg(alternative_arg())
                        .arg(alpha_arg())
                        .arg(config_arg())
                        .arg(output_arg())
                        .arg(no_summary_arg()),
                )
                .subcommand(
                    Command::new("two-sample")
                        .about("Compare the means of two columns")
                        .arg(data_arg())
                        .arg(
                            Arg::new("a")
                                .long("a")
                                .help("Column holding the first sample")
                                .required(true)
                                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                        )
                        .arg(
                            Arg::new("b")
                                .long("b")
                                .help("Column holding the second sample")
                                .required(true)
                                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                        )
                        .arg(
                            Arg::new("test_type")
                                .long("test-type")
                                .help("'ind' for independent samples, 'rel' for related (paired) samples")
                                .value_parser(["ind", "rel"])
                                .value_hint(ValueHint::Other),
                        )
                        .arg(
                            Arg::new("unequal_var")
                                .long("unequal-var")
                                .help("Do not assume equal population variances (Welch's t-test).")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(alternative_arg())
                        .arg(alpha_arg())
                        .arg(config_arg())
                        .arg(output_arg())
                        .arg(no_summary_arg()),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("ols", sub_m)) => handle_ols(sub_m),
        Some(("ttest", sub_m)) => handle_ttest(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_ols(matches: &ArgMatches) -> Result<()> {
    let config = RunConfig::from_arguments(matches)?;
    let params = OlsParams {
        data: required(matches, "data")?,
        y: required(matches, "y")?,
        x: matches
            .get_many::<String>("x")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        output: matches.get_one::<PathBuf>("output_file").cloned(),
        print_summary: !matches.get_flag("no_summary"),
    };
    log::info!("[statkit::ols] Data file: {:?}", params.data);

    match run_ols(&params, &config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Regression failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_ttest(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("one-sample", sub_m)) => {
            let config = RunConfig::from_arguments(sub_m)?;
            let params = OneSampleParams {
                data: required(sub_m, "data")?,
                column: required(sub_m, "column")?,
                popmean: required(sub_m, "popmean")?,
                output: sub_m.get_one::<PathBuf>("output_file").cloned(),
                print_summary: !sub_m.get_flag("no_summary"),
            };

            match run_one_sample(&params, &config) {
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!("t-test failed: {:#}", e);
                    std::process::exit(1)
                }
            }
        }
        Some(("two-sample", sub_m)) => {
            let config = RunConfig::from_arguments(sub_m)?;
            let params = TwoSampleParams {
                data: required(sub_m, "data")?,
                a: required(sub_m, "a")?,
                b: required(sub_m, "b")?,
                output: sub_m.get_one::<PathBuf>("output_file").cloned(),
                print_summary: !sub_m.get_flag("no_summary"),
            };

            match run_two_sample(&params, &config) {
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!("t-test failed: {:#}", e);
                    std::process::exit(1)
                }
            }
        }
        _ => unreachable!(),
    }
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing required argument '{}'", id))
}
