use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use std::{env, process};

use concept_lattice::formats::{self, JSONValue, Observation};
use concept_lattice::{utils, Context};

use getopts::Options;

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();
    env_logger::init();

    let config = Config::new();

    // Read the observations.
    if config.verbose {
        let size = utils::file_size(&config.input_file).unwrap_or(String::from("unknown size"));
        eprintln!("Reading observations from {} ({})", config.input_file.display(), size);
    }
    let (declared, observations) = formats::read_observation_file(&config.input_file)?;
    let attributes = if let Some(attributes) = config.attributes.clone() {
        attributes
    } else if let Some(attributes) = declared {
        attributes
    } else {
        attributes_in_order(&observations)
    };

    // Build the context.
    let mut context: Context<String, String> = Context::new(attributes)?;
    for observation in observations {
        context.insert(observation.object, &observation.attributes)?;
    }
    if config.verbose {
        eprintln!(
            "Built a lattice with {} concepts and {} edges from {} objects and {} attributes",
            context.lattice().len(), context.lattice().lattice().edges(), context.len(), context.attributes().len()
        );
    }

    // Statistics.
    if config.has_queries() {
        let statistics = statistics(&context, &config)?;
        println!("{}", statistics);
    }

    // Hasse diagram.
    if let Some(output_file) = config.output_file.as_ref() {
        let file = File::create(output_file).map_err(|x| format!("Failed to create {}: {}", output_file.display(), x))?;
        let mut output = BufWriter::new(file);
        let edges = context.write_hasse_diagram(&mut output, config.reverse)?;
        output.flush().map_err(|x| x.to_string())?;
        if config.verbose {
            eprintln!("Wrote {} edges to {}", edges, output_file.display());
        }
    } else if !config.has_queries() {
        let mut output = BufWriter::new(io::stdout().lock());
        context.write_hasse_diagram(&mut output, config.reverse)?;
        output.flush().map_err(|x| x.to_string())?;
    }

    if config.verbose {
        let end_time = Instant::now();
        let seconds = end_time.duration_since(start_time).as_secs_f64();
        eprintln!("Total time: {:.3} seconds", seconds);
    }

    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    input_file: PathBuf,
    output_file: Option<PathBuf>,
    attributes: Option<Vec<String>>,
    support: Vec<Vec<String>>,
    conditional: Vec<(Vec<String>, Vec<String>)>,
    reverse: bool,
    verbose: bool,
}

impl Config {
    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();
        let header = format!("Usage: {} [options] observations.tsv[.gz] > lattice.dot", program);

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt(
            "a",
            "attributes",
            "comma-separated attribute universe (default: file header or order of appearance)",
            "LIST",
        );
        opts.optopt(
            "o",
            "output",
            "write the Hasse diagram to this file (default: stdout without queries)",
            "FILE",
        );
        opts.optmulti("s", "support", "report the support of a comma-separated attribute list", "LIST");
        opts.optmulti(
            "c",
            "conditional",
            "report the conditional frequency of attributes A given attributes B",
            "A|B",
        );
        opts.optflag("r", "reverse", "draw edges from specific concepts to general ones");
        opts.optflag("v", "verbose", "print progress information to stderr");

        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        // Parse options.
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }

        // Parse positional arguments
        if matches.free.len() != 1 {
            eprintln!("Error: Expected 1 positional argument (input file)\n");
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        }
        let input_file = PathBuf::from(&matches.free[0]);
        let output_file = matches.opt_str("o").map(PathBuf::from);

        let attributes = matches.opt_str("a").map(|s| split_list(&s));
        if let Some(attributes) = attributes.as_ref() {
            if attributes.is_empty() {
                eprintln!("Error: --attributes must not be empty");
                process::exit(1);
            }
        }

        let support: Vec<Vec<String>> = matches.opt_strs("s").iter().map(|s| split_list(s)).collect();

        let mut conditional: Vec<(Vec<String>, Vec<String>)> = Vec::new();
        for s in matches.opt_strs("c") {
            match s.split_once('|') {
                Some((a, b)) => conditional.push((split_list(a), split_list(b))),
                None => {
                    eprintln!("Error: Invalid --conditional '{}'. Expected A|B", s);
                    process::exit(1);
                }
            }
        }

        Config {
            input_file,
            output_file,
            attributes,
            support,
            conditional,
            reverse: matches.opt_present("r"),
            verbose: matches.opt_present("v"),
        }
    }

    fn has_queries(&self) -> bool {
        !self.support.is_empty() || !self.conditional.is_empty()
    }
}

//-----------------------------------------------------------------------------

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|item| item.trim()).filter(|item| !item.is_empty()).map(String::from).collect()
}

// Attributes in the order of their first appearance.
fn attributes_in_order(observations: &[Observation]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for observation in observations {
        for attribute in observation.attributes.iter() {
            if !result.contains(attribute) {
                result.push(attribute.clone());
            }
        }
    }
    result
}

fn statistics(context: &Context<String, String>, config: &Config) -> Result<JSONValue, String> {
    let mut support: Vec<JSONValue> = Vec::new();
    for attributes in config.support.iter() {
        let count = context.support(attributes)?;
        let mut fields = vec![
            ("attributes".to_string(), formats::json_strings(attributes)),
            ("support".to_string(), JSONValue::Number(count)),
        ];
        formats::push_frequency(&mut fields, "marginal", context.marginal(attributes));
        support.push(JSONValue::Object(fields));
    }

    let mut conditional: Vec<JSONValue> = Vec::new();
    for (a, b) in config.conditional.iter() {
        // Validate both attribute lists before computing the frequencies.
        context.encode(a)?;
        context.encode(b)?;
        let mut fields = vec![
            ("attributes".to_string(), formats::json_strings(a)),
            ("condition".to_string(), formats::json_strings(b)),
        ];
        formats::push_frequency(&mut fields, "joint", context.joint(a, b));
        formats::push_frequency(&mut fields, "conditional", context.conditional(a, b));
        conditional.push(JSONValue::Object(fields));
    }

    Ok(JSONValue::Object(vec![
        ("objects".to_string(), JSONValue::Number(context.len())),
        ("attributes".to_string(), JSONValue::Number(context.attributes().len())),
        ("concepts".to_string(), JSONValue::Number(context.lattice().len())),
        ("support".to_string(), JSONValue::Array(support)),
        ("conditional".to_string(), JSONValue::Array(conditional)),
    ]))
}

//-----------------------------------------------------------------------------
