// Rust guideline compliant 2026-07-26

//! Public surface: register benchmark families, then run them against a
//! parsed [`Cli`]. Wires `bench-registry` → `bench-controller`
//! → `bench-report`, a "domain component + adapter" pipeline of small,
//! independently testable crates plugged together at the top.

pub mod cli;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, IsTerminal as _, Write as _};

use cli::{ColorMode, ReportFormat};
pub use cli::Cli;
pub use domain::Error;

use controller::GlobalDefaults;
use domain::{FamilyId, Instance};
use registry::{FamilyBuilder, Registry};
use report::{ConsoleReporter, Context, CsvReporter, JsonReporter, Reporter};

/// Registers benchmark families and runs them against a parsed [`Cli`].
#[derive(Debug, Default)]
pub struct Harness {
    registry: Registry,
}

impl Harness {
    /// An empty harness with no families registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a family described by `builder`.
    ///
    /// # Errors
    ///
    /// Returns [`domain::Error::InvalidConfig`] if `builder` fails
    /// validation (see [`FamilyBuilder::build`]).
    pub fn register(&mut self, builder: FamilyBuilder) -> Result<FamilyId, domain::Error> {
        let family = builder.build()?;
        Ok(self.registry.add(family))
    }

    /// Expand every registered family, apply `cli`'s filter, run whatever
    /// matches, report through the console sink (and file sink, if
    /// `--benchmark_out` is set), and return the process exit code: 0 on
    /// success, non-zero only on reporter rejection or an unrecoverable
    /// initialisation error.
    ///
    /// # Errors
    ///
    /// Returns [`domain::Error::FilterCompile`] if `--benchmark_filter`
    /// isn't a valid regex, or [`domain::Error::SinkOpen`] if
    /// `--benchmark_out` can't be opened.
    pub fn run(&self, cli: &Cli) -> Result<i32, domain::Error> {
        clock::init();

        let mut instances = self.filtered_instances(cli)?;
        self.apply_global_defaults(&mut instances, cli);
        group_last_in_family(&mut instances);

        if cli.benchmark_list_tests {
            for inst in &instances {
                println!("{}", inst.name);
            }
            return Ok(0);
        }

        let grouped = group_by_family(instances);
        let mut records = Vec::new();
        for family in self.registry.families() {
            if let Some(group) = grouped.get(&family.id) {
                records.extend(controller::run_family(family, group, GlobalDefaults::default()));
            }
        }

        let context = self.build_context(cli, &records);
        let mut ok = true;

        let use_color = match cli.benchmark_color {
            ColorMode::True => true,
            ColorMode::False => false,
            ColorMode::Auto => io::stdout().is_terminal(),
        };
        ok &= self.report_to(
            stdout_reporter(cli.benchmark_format, cli.benchmark_display_aggregates_only, use_color),
            &context,
            &records,
        );

        if let Some(path) = &cli.benchmark_out {
            let file = File::create(path).map_err(|source| domain::Error::SinkOpen {
                path: path.display().to_string(),
                source,
            })?;
            ok &= self.report_to(file_reporter(cli.benchmark_out_format, file, cli.benchmark_report_aggregates_only), &context, &records);
        }

        Ok(if ok { 0 } else { 1 })
    }

    fn filtered_instances(&self, cli: &Cli) -> Result<Vec<Instance>, domain::Error> {
        let instances = self.registry.expand_instances();
        Ok(match cli.benchmark_filter.as_deref() {
            None | Some("all") => instances,
            Some("") => {
                log::info!("harness.run: empty --benchmark_filter, running nothing");
                Vec::new()
            }
            Some(pattern) => {
                let filter = Registry::compile_filter(pattern)?;
                instances.into_iter().filter(|inst| filter.is_match(&inst.name)).collect()
            }
        })
    }

    /// CLI-supplied `--benchmark_min_time`/`--benchmark_repetitions` only
    /// take effect for families that didn't set their own (a family-level
    /// `FamilyBuilder::min_time`/`::repetitions` always wins).
    fn apply_global_defaults(&self, instances: &mut [Instance], cli: &Cli) {
        for inst in instances {
            let Some(family) = self.registry.get(inst.family_id) else {
                continue;
            };
            if family.min_time.is_none() {
                if let Some(min_time) = cli.benchmark_min_time {
                    inst.min_time = min_time;
                }
            }
            if family.repetitions.is_none() {
                if let Some(reps) = cli.benchmark_repetitions {
                    inst.repetitions = reps;
                }
            }
        }
    }

    fn build_context(&self, cli: &Cli, records: &[domain::RunRecord]) -> Context {
        let info = clock::cpu_info();
        let name_field_width = records.iter().map(|r| r.name.len()).max().unwrap_or(10).max("Benchmark".len());
        let build_type = if cfg!(debug_assertions) { "debug" } else { "release" };
        let mut context = Context::new(info.num_cpus, info.mhz_per_cpu, info.scaling_enabled, name_field_width, build_type, clock::local_date_time_string());

        if let Some(path) = &cli.benchmark_context {
            match load_context_file(path) {
                Ok(extra) => context = context.with_extra(extra),
                Err(err) => log::warn!("harness.run: failed to load --benchmark_context={}: {err}", path.display()),
            }
        }
        context
    }

    fn report_to(&self, mut reporter: Box<dyn Reporter>, context: &Context, records: &[domain::RunRecord]) -> bool {
        if !reporter.report_context(context) {
            log::warn!("harness.run: a reporter rejected the run context");
            return false;
        }
        reporter.report_runs(records);
        reporter.finalize();
        true
    }
}

fn group_by_family(instances: Vec<Instance>) -> BTreeMap<FamilyId, Vec<Instance>> {
    let mut grouped: BTreeMap<FamilyId, Vec<Instance>> = BTreeMap::new();
    for inst in instances {
        grouped.entry(inst.family_id).or_default().push(inst);
    }
    grouped
}

/// Recompute `last_in_family` over the *filtered* instance set: a family
/// whose tail instance was filtered out must still get exactly one
/// `last_in_family` instance, or `run_family` never emits its `_BigO`/`_RMS`
/// rows.
fn group_last_in_family(instances: &mut [Instance]) {
    let mut last_index_per_family: BTreeMap<FamilyId, usize> = BTreeMap::new();
    for (i, inst) in instances.iter().enumerate() {
        last_index_per_family.insert(inst.family_id, i);
    }
    for (i, inst) in instances.iter_mut().enumerate() {
        inst.last_in_family = last_index_per_family.get(&inst.family_id) == Some(&i);
    }
}

fn stdout_reporter(format: ReportFormat, aggregates_only: bool, use_color: bool) -> Box<dyn Reporter> {
    let out: Box<dyn io::Write> = Box::new(io::stdout());
    match format {
        ReportFormat::Console => Box::new(ConsoleReporter::new(out, aggregates_only, use_color)),
        ReportFormat::Json => Box::new(JsonReporter::new(out, aggregates_only)),
        ReportFormat::Csv => Box::new(CsvReporter::new(out, aggregates_only)),
    }
}

fn file_reporter(format: ReportFormat, file: File, aggregates_only: bool) -> Box<dyn Reporter> {
    let out: Box<dyn io::Write> = Box::new(file);
    match format {
        ReportFormat::Console => Box::new(ConsoleReporter::new(out, aggregates_only, false)),
        ReportFormat::Json => Box::new(JsonReporter::new(out, aggregates_only)),
        ReportFormat::Csv => Box::new(CsvReporter::new(out, aggregates_only)),
    }
}

/// Load the `--benchmark_context` file: a flat JSON object
/// of string key/value pairs merged into the reporter [`Context`].
fn load_context_file(path: &std::path::Path) -> Result<Vec<(String, String)>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    let obj = value.as_object().ok_or_else(|| "--benchmark_context file must be a JSON object".to_owned())?;
    Ok(obj
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().map_or_else(|| v.to_string(), str::to_owned)))
        .collect())
}
