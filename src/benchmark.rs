//! Benchmark report schema.
//!
//! One [`BenchmarkMeasurement`] point is written per benchmark result of a
//! performance run, tagged with the machine and compiler it ran on and
//! annotated with CI build information when available. Golden results,
//! used to normalize scores, live in their own measurement.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::measurement::Measurement;
use crate::query::{Expression, Select, WherePredicate};
use crate::types::ValueKind;
use crate::value::FieldValue;

/// Column names of the `benchmarks` measurement.
pub mod columns {
    /// CPU architecture of the benchmark machine (Tag).
    pub const ENV_MACHINE_CPU: &str = "environment.machine.cpu";
    /// Operating system of the benchmark machine (Tag).
    pub const ENV_MACHINE_OS: &str = "environment.machine.os";
    /// JDK version (Field).
    pub const ENV_JDK_VERSION: &str = "environment.jdk.version";
    /// JDK vendor (Field).
    pub const ENV_JDK_VENDOR: &str = "environment.jdk.vendor";

    /// Compiler backend, e.g. `native` (Tag).
    pub const BACKEND_TYPE: &str = "kotlin.backend.type";
    /// Compiler backend version (Field).
    pub const BACKEND_VERSION: &str = "kotlin.backend.version";
    /// Comma-joined compiler flags (Tag).
    pub const BACKEND_FLAGS: &str = "kotlin.backend.flags";
    /// Compiler version (Field).
    pub const KOTLIN_VERSION: &str = "kotlin.kotlinVersion";

    /// Benchmark name (Tag).
    pub const BENCHMARK_NAME: &str = "benchmark.name";
    /// Benchmark status, e.g. `PASSED` (Field).
    pub const BENCHMARK_STATUS: &str = "benchmark.status";
    /// Measured score (Field).
    pub const BENCHMARK_SCORE: &str = "benchmark.score";
    /// Metric the score is expressed in (Tag).
    pub const BENCHMARK_METRIC: &str = "benchmark.metric";
    /// Runtime in microseconds (Field).
    pub const BENCHMARK_RUNTIME: &str = "benchmark.runtimeInUs";
    /// Number of measured iterations (Field).
    pub const BENCHMARK_REPEAT: &str = "benchmark.repeat";
    /// Number of warmup iterations (Field).
    pub const BENCHMARK_WARMUP: &str = "benchmark.warmup";

    /// CI build number (Field).
    pub const BUILD_NUMBER: &str = "build.number";
    /// CI build start time (Field).
    pub const BUILD_START_TIME: &str = "build.startTime";
    /// CI build end time (Field).
    pub const BUILD_END_TIME: &str = "build.endTime";
    /// Commits of the CI build as a JSON array (Field).
    pub const BUILD_COMMITS: &str = "build.commits";
    /// Branch the CI build ran on (Field).
    pub const BUILD_BRANCH: &str = "build.branch";
}

use columns::*;

/// A commit included in a CI build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash.
    #[serde(alias = "version")]
    pub revision: String,
    /// Author of the commit.
    #[serde(alias = "username")]
    pub developer: String,
}

/// Commits of a CI build, as reported by the CI changes API
/// (`{"change": [{"version": ..., "username": ...}]}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CommitsList {
    /// Commits in CI order.
    #[serde(default, rename = "change")]
    pub commits: Vec<Commit>,
}

impl CommitsList {
    /// Parse a CI changes document. A missing `change` key means no commits.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Encode for the `build.commits` field: a JSON array of
    /// `{"revision", "developer"}` objects.
    pub fn to_field(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.commits)?)
    }

    /// Decode a `build.commits` field value.
    pub fn from_field(value: &str) -> Result<Self> {
        Ok(Self {
            commits: serde_json::from_str(value)?,
        })
    }
}

/// CI build a benchmark run belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildInfo {
    /// Build number, e.g. `1.3.60-dev-42`.
    pub number: String,
    /// Start time as reported by CI.
    pub start_time: String,
    /// End time as reported by CI.
    pub end_time: String,
    pub commits: CommitsList,
    /// Branch name.
    pub branch: String,
}

#[derive(Debug, Deserialize)]
struct BenchmarksReport {
    env: Environment,
    kotlin: Compiler,
    benchmarks: Vec<BenchmarkResult>,
}

#[derive(Debug, Deserialize)]
struct Environment {
    machine: Machine,
    jdk: Jdk,
}

#[derive(Debug, Deserialize)]
struct Machine {
    cpu: String,
    os: String,
}

#[derive(Debug, Deserialize)]
struct Jdk {
    version: String,
    vendor: String,
}

#[derive(Debug, Deserialize)]
struct Compiler {
    backend: Backend,
    #[serde(rename = "kotlinVersion")]
    kotlin_version: String,
}

#[derive(Debug, Deserialize)]
struct Backend {
    #[serde(rename = "type")]
    kind: String,
    version: String,
    #[serde(default)]
    flags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BenchmarkResult {
    name: String,
    #[serde(default = "default_metric")]
    metric: String,
    status: String,
    score: f64,
    #[serde(rename = "runtimeInUs")]
    runtime_in_us: f64,
    repeat: i64,
    warmup: i64,
}

fn default_metric() -> String {
    "EXECUTION_TIME".to_string()
}

/// The `benchmarks` measurement.
pub struct BenchmarkMeasurement;

impl BenchmarkMeasurement {
    /// Measurement name.
    pub const NAME: &'static str = "benchmarks";

    /// Empty `benchmarks` point.
    pub fn schema() -> Result<Measurement> {
        Measurement::builder(Self::NAME)
            .tag(ENV_MACHINE_CPU)
            .tag(ENV_MACHINE_OS)
            .field(ENV_JDK_VERSION, ValueKind::String)
            .field(ENV_JDK_VENDOR, ValueKind::String)
            .tag(BACKEND_TYPE)
            .field(BACKEND_VERSION, ValueKind::String)
            .tag(BACKEND_FLAGS)
            .field(KOTLIN_VERSION, ValueKind::String)
            .tag(BENCHMARK_NAME)
            .field(BENCHMARK_STATUS, ValueKind::String)
            .field(BENCHMARK_SCORE, ValueKind::Float)
            .tag(BENCHMARK_METRIC)
            .field(BENCHMARK_RUNTIME, ValueKind::Float)
            .field(BENCHMARK_REPEAT, ValueKind::Int)
            .field(BENCHMARK_WARMUP, ValueKind::Int)
            .field(BUILD_NUMBER, ValueKind::String)
            .field(BUILD_START_TIME, ValueKind::String)
            .field(BUILD_END_TIME, ValueKind::String)
            .field(BUILD_COMMITS, ValueKind::String)
            .field(BUILD_BRANCH, ValueKind::String)
            .build()
    }

    /// Fill the `build.*` fields of `point`.
    pub fn set_build_info(point: &mut Measurement, build: &BuildInfo) -> Result<()> {
        point
            .set_field(BUILD_NUMBER, build.number.as_str())?
            .set_field(BUILD_BRANCH, build.branch.as_str())?
            .set_field(BUILD_COMMITS, build.commits.to_field()?)?
            .set_field(BUILD_START_TIME, build.start_time.as_str())?
            .set_field(BUILD_END_TIME, build.end_time.as_str())?;
        Ok(())
    }

    /// One point per benchmark result of a JSON benchmarks report.
    ///
    /// Backend flags are stored comma-joined in a single tag; a run without
    /// flags leaves the tag unset.
    pub fn from_report(report: &str, build: Option<&BuildInfo>) -> Result<Vec<Measurement>> {
        let report: BenchmarksReport = serde_json::from_str(report)?;
        let schema = Self::schema()?;
        let flags = report.kotlin.backend.flags.join(",");

        let mut points = Vec::with_capacity(report.benchmarks.len());
        for result in &report.benchmarks {
            let mut point = schema.instance();
            point
                .set_tag(ENV_MACHINE_CPU, report.env.machine.cpu.as_str())?
                .set_tag(ENV_MACHINE_OS, report.env.machine.os.as_str())?
                .set_field(ENV_JDK_VENDOR, report.env.jdk.vendor.as_str())?
                .set_field(ENV_JDK_VERSION, report.env.jdk.version.as_str())?
                .set_tag(BACKEND_TYPE, report.kotlin.backend.kind.as_str())?
                .set_field(BACKEND_VERSION, report.kotlin.backend.version.as_str())?
                .set_field(KOTLIN_VERSION, report.kotlin.kotlin_version.as_str())?
                .set_tag(BENCHMARK_NAME, result.name.as_str())?
                .set_field(BENCHMARK_STATUS, result.status.as_str())?
                .set_field(BENCHMARK_SCORE, result.score)?
                .set_tag(BENCHMARK_METRIC, result.metric.as_str())?
                .set_field(BENCHMARK_RUNTIME, result.runtime_in_us)?
                .set_field(BENCHMARK_REPEAT, result.repeat)?
                .set_field(BENCHMARK_WARMUP, result.warmup)?;
            if !flags.is_empty() {
                point.set_tag(BACKEND_FLAGS, flags.as_str())?;
            }
            if let Some(build) = build {
                Self::set_build_info(&mut point, build)?;
            }
            points.push(point);
        }
        Ok(points)
    }

    /// Distinct build numbers recorded for a target OS.
    pub fn build_numbers_query(target: &str) -> Select {
        Self::distinct_for_target(BUILD_NUMBER, WherePredicate::eq(ENV_MACHINE_OS, target))
    }

    /// Distinct build numbers of one branch for a target OS.
    pub fn branch_build_numbers_query(target: &str, branch: &str) -> Select {
        Self::distinct_for_target(
            BUILD_NUMBER,
            WherePredicate::eq(ENV_MACHINE_OS, target).and(WherePredicate::eq(BUILD_BRANCH, branch)),
        )
    }

    /// Distinct branches recorded for a target OS.
    pub fn branches_query(target: &str) -> Select {
        Self::distinct_for_target(BUILD_BRANCH, WherePredicate::eq(ENV_MACHINE_OS, target))
    }

    /// All points of one build on a target OS.
    pub fn build_points_query(target: &str, build_number: &str) -> Select {
        Select::new(
            Expression::All,
            Expression::Measurement(Self::NAME.to_string()),
            Some(
                WherePredicate::eq(ENV_MACHINE_OS, target)
                    .and(WherePredicate::eq(BUILD_NUMBER, build_number)),
            ),
        )
    }

    // DISTINCT only applies to fields, so filter on tags in a subquery first.
    fn distinct_for_target(column: &str, filter: WherePredicate) -> Select {
        let inner = Select::new(
            Expression::Column(column.to_string()),
            Expression::Measurement(Self::NAME.to_string()),
            Some(filter),
        );
        Select::new(Expression::distinct(column), inner.into(), None)
    }
}

/// Reference score of a benchmark metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldenResult {
    /// Benchmark the reference applies to.
    pub benchmark_name: String,
    /// Metric of the reference score.
    pub metric: String,
    /// Reference score.
    pub value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoldenResultsInfo {
    golden_results: Vec<GoldenResult>,
}

/// The `goldenResults` measurement.
pub struct GoldenResultMeasurement;

impl GoldenResultMeasurement {
    /// Measurement name.
    pub const NAME: &'static str = "goldenResults";

    /// Empty `goldenResults` point.
    pub fn schema() -> Result<Measurement> {
        Measurement::builder(Self::NAME)
            .tag(BENCHMARK_NAME)
            .tag(BENCHMARK_METRIC)
            .field(BENCHMARK_SCORE, ValueKind::Float)
            .build()
    }

    /// Point for a single golden result.
    pub fn point(result: &GoldenResult) -> Result<Measurement> {
        let mut point = Self::schema()?;
        point
            .set_tag(BENCHMARK_NAME, result.benchmark_name.as_str())?
            .set_tag(BENCHMARK_METRIC, result.metric.as_str())?
            .set_field(BENCHMARK_SCORE, result.value)?;
        Ok(point)
    }

    /// Points for a `{"goldenResults": [...]}` registration document.
    pub fn from_json(body: &str) -> Result<Vec<Measurement>> {
        let info: GoldenResultsInfo = serde_json::from_str(body)?;
        info.golden_results.iter().map(Self::point).collect()
    }

    /// Read a decoded `goldenResults` point back.
    pub fn to_result(point: &Measurement) -> Result<GoldenResult> {
        let missing = |column: &str| Error::Parse {
            message: format!("Golden result point has no value for '{}'", column),
        };
        let text = |column: &str| -> Result<String> {
            point
                .get(column)
                .and_then(FieldValue::as_str)
                .map(str::to_string)
                .ok_or_else(|| missing(column))
        };

        Ok(GoldenResult {
            benchmark_name: text(BENCHMARK_NAME)?,
            metric: text(BENCHMARK_METRIC)?,
            value: point
                .get(BENCHMARK_SCORE)
                .and_then(FieldValue::as_float)
                .ok_or_else(|| missing(BENCHMARK_SCORE))?,
        })
    }
}
