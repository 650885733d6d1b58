// Rust guideline compliant 2026-07-26

//! Registry component -- holds registered benchmark families, expands them
//! into concrete instances, and filters instances by name.
//!
//! Entry points: [`FamilyBuilder::new`] to describe a family,
//! [`Registry::add`] to register it, [`Registry::expand_instances`] to get
//! every (argument tuple, thread count) instance, and
//! [`Registry::find_matching`] to apply `--benchmark_filter`.

mod builder;
mod range;

pub use builder::FamilyBuilder;

use domain::{BigO, Family, FamilyId, Instance};
use regex::Regex;

/// Holds every registered [`Family`] for the process.
#[derive(Debug, Default)]
pub struct Registry {
    families: Vec<Family>,
    next_id: u64,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `family`, assigning it a fresh [`FamilyId`] and returning
    /// it. The family's own `id` field (set by [`FamilyBuilder::new`]
    /// to a placeholder) is overwritten here.
    pub fn add(&mut self, mut family: Family) -> FamilyId {
        let id = FamilyId(self.next_id);
        self.next_id += 1;
        family.id = id;
        log::debug!("registry.family.added: id={id} name={}", family.name);
        self.families.push(family);
        id
    }

    /// Every registered family, in registration order.
    #[must_use]
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Look up a family by id.
    #[must_use]
    pub fn get(&self, id: FamilyId) -> Option<&Family> {
        self.families.iter().find(|f| f.id == id)
    }

    /// Expand every registered family into its concrete instances: the
    /// cross product of argument tuples and thread counts, with a family
    /// that declares no argument tuples or thread counts expanding to one
    /// instance using the default arguments/thread count.
    #[must_use]
    pub fn expand_instances(&self) -> Vec<Instance> {
        let mut out = Vec::new();
        for family in &self.families {
            let args_list: Vec<Vec<i64>> = if family.args.is_empty() {
                vec![Vec::new()]
            } else {
                family.args.clone()
            };
            let threads_list: Vec<usize> = if family.thread_counts.is_empty() {
                vec![1]
            } else {
                family.thread_counts.clone()
            };
            let total = args_list.len() * threads_list.len();
            let mut emitted = 0usize;
            for args in &args_list {
                for &threads in &threads_list {
                    emitted += 1;
                    out.push(Instance {
                        family_id: family.id,
                        name: instance_name(family, args, threads, threads_list.len() > 1),
                        args: args.clone(),
                        threads,
                        repetitions: family.repetitions.unwrap_or(1),
                        min_time: family.min_time.unwrap_or(0.5),
                        min_warmup_time: family.min_warmup_time,
                        fixed_iterations: family.fixed_iterations,
                        use_real_time: family.use_real_time,
                        use_manual_time: family.use_manual_time,
                        complexity: clone_big_o(&family.complexity),
                        time_unit: family.time_unit,
                        last_in_family: emitted == total,
                    });
                }
            }
        }
        out
    }

    /// Compile a `--benchmark_filter` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`domain::Error::FilterCompile`] if `pattern` is not a valid
    /// regular expression.
    pub fn compile_filter(pattern: &str) -> Result<Regex, domain::Error> {
        Regex::new(pattern).map_err(|e| domain::Error::FilterCompile(e.to_string()))
    }

    /// Instances whose name matches `filter`, preserving registration
    /// order. `None` matches everything.
    #[must_use]
    pub fn find_matching<'a>(instances: &'a [Instance], filter: Option<&Regex>) -> Vec<&'a Instance> {
        match filter {
            Some(re) => instances.iter().filter(|inst| re.is_match(&inst.name)).collect(),
            None => instances.iter().collect(),
        }
    }
}

fn clone_big_o(big_o: &BigO) -> BigO {
    match big_o {
        BigO::O1 => BigO::O1,
        BigO::OLogN => BigO::OLogN,
        BigO::ON => BigO::ON,
        BigO::ONLogN => BigO::ONLogN,
        BigO::ONSquared => BigO::ONSquared,
        BigO::ONCubed => BigO::ONCubed,
        BigO::Auto => BigO::Auto,
        BigO::Lambda(f) => BigO::Lambda(f.clone()),
        BigO::None => BigO::None,
    }
}

/// Build the fully suffixed instance name, e.g.
/// `"BM_Copy/8/16/threads:4/min_time:0.500/repeats:3/manual_time"`.
///
/// Besides the argument tuple and thread count, a family-level
/// `min_time`/`repetitions`/timing-mode override appends its own token --
/// matching Google Benchmark's own naming, and making an instance with an
/// explicit override distinguishable by name from one using the
/// controller's defaults.
fn instance_name(family: &Family, args: &[i64], threads: usize, show_threads: bool) -> String {
    let mut name = family.name.clone();
    for (i, arg) in args.iter().enumerate() {
        if let Some(arg_name) = family.arg_names.get(i).filter(|n| !n.is_empty()) {
            name.push_str(&format!("/{arg_name}:{arg}"));
        } else {
            name.push_str(&format!("/{arg}"));
        }
    }
    if show_threads {
        name.push_str(&format!("/threads:{threads}"));
    }
    if let Some(min_time) = family.min_time {
        name.push_str(&format!("/min_time:{min_time:.3}"));
    }
    if let Some(repeats) = family.repetitions {
        name.push_str(&format!("/repeats:{repeats}"));
    }
    if family.use_manual_time {
        name.push_str("/manual_time");
    } else if family.use_real_time {
        name.push_str("/real_time");
    }
    name
}
