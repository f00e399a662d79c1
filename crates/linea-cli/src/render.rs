//! Text output for task results.
//!
//! A [`Presenter`] only decides how headings and status lines look; the
//! `render_*` functions lay out the numbers and are shared by both styles.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use colored::Colorize;
use num_complex::Complex64;

use linea_core::tasks::{EigenAnalysis, EigenMethod, Eigenvectors, KernelImage, PlaneBasis};
use linea_core::{Matrix, TaskError, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Decorated,
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Style::Plain),
            "decorated" => Ok(Style::Decorated),
            other => Err(format!("unknown output style: {}", other)),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Plain => write!(f, "plain"),
            Style::Decorated => write!(f, "decorated"),
        }
    }
}

impl Style {
    pub fn presenter(self) -> Box<dyn Presenter> {
        match self {
            Style::Plain => Box::new(Plain),
            Style::Decorated => Box::new(Decorated),
        }
    }
}

pub trait Presenter {
    fn title(&self, out: &mut dyn Write, text: &str) -> io::Result<()>;
    fn section(&self, out: &mut dyn Write, text: &str) -> io::Result<()>;
    fn success(&self, out: &mut dyn Write, text: &str) -> io::Result<()>;
    fn warning(&self, out: &mut dyn Write, text: &str) -> io::Result<()>;
    fn error(&self, out: &mut dyn Write, text: &str) -> io::Result<()>;
}

/// Unadorned output, suitable for pipes and tests.
pub struct Plain;

impl Presenter for Plain {
    fn title(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{}", text)
    }

    fn section(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{}:", text)
    }

    fn success(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{}", text)
    }

    fn warning(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "warning: {}", text)
    }

    fn error(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "error: {}", text)
    }
}

/// Banners and colour for the interactive console.
pub struct Decorated;

impl Presenter for Decorated {
    fn title(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        let rule = "=".repeat(text.chars().count() + 8);
        writeln!(out)?;
        writeln!(out, "{}", rule.cyan())?;
        writeln!(out, "    {}", text.bold())?;
        writeln!(out, "{}", rule.cyan())
    }

    fn section(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{} {}", ">>".cyan().bold(), text.bold())
    }

    fn success(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{} {}", "ok:".green().bold(), text)
    }

    fn warning(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{} {}", "warn:".yellow().bold(), text)
    }

    fn error(&self, out: &mut dyn Write, text: &str) -> io::Result<()> {
        writeln!(out, "{} {}", "err:".red().bold(), text)
    }
}

/// Rounds to six decimals and drops trailing zeros; `-0` prints as `0`.
pub fn format_number(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let mut s = format!("{:.6}", x);
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn format_vector(v: &Vector) -> String {
    let parts: Vec<String> = v.iter().map(|&x| format_number(x)).collect();
    format!("[{}]", parts.join(", "))
}

/// Values with a zero imaginary part print as plain reals. The engine has
/// already snapped negligible imaginary parts to zero.
pub fn format_complex(z: Complex64) -> String {
    if z.im == 0.0 {
        return format_number(z.re);
    }
    let sign = if z.im < 0.0 { '-' } else { '+' };
    format!("{} {} {}i", format_number(z.re), sign, format_number(z.im.abs()))
}

pub fn format_complex_vector(v: &[Complex64]) -> String {
    let parts: Vec<String> = v.iter().map(|&z| format_complex(z)).collect();
    format!("[{}]", parts.join(", "))
}

fn write_matrix(out: &mut dyn Write, m: &Matrix) -> io::Result<()> {
    for row in m.to_rows() {
        writeln!(out, "  {}", format_vector(&Vector::from_vec(row)))?;
    }
    Ok(())
}

fn write_vectors(out: &mut dyn Write, vectors: &[Vector], name: &str) -> io::Result<()> {
    for (i, v) in vectors.iter().enumerate() {
        writeln!(out, "  {}{} = {}", name, i + 1, format_vector(v))?;
    }
    Ok(())
}

pub fn render_menu(p: &dyn Presenter, out: &mut dyn Write) -> io::Result<()> {
    p.title(out, "LINEAR ALGEBRA CONSOLE")?;
    writeln!(out, "  1. Basis and dimension of a plane in R^3")?;
    writeln!(out, "  2. Kernel and image of a linear map")?;
    writeln!(out, "  3. Matrix of a linear map in other bases")?;
    writeln!(out, "  4. Eigenvalues and eigenvectors")?;
    writeln!(out, "  0. Exit")
}

pub fn render_plane(p: &dyn Presenter, out: &mut dyn Write, plane: &PlaneBasis) -> io::Result<()> {
    p.title(out, "PLANE BASIS")?;
    let n = &plane.normal;
    writeln!(
        out,
        "  W = {{ (x, y, z) : {}x + {}y + {}z = 0 }}",
        format_number(n[0]),
        format_number(n[1]),
        format_number(n[2])
    )?;
    if plane.is_whole_space() {
        p.warning(out, "all coefficients are zero, W is the whole space R^3")?;
    }
    p.section(out, "Basis")?;
    write_vectors(out, &plane.basis, "u")?;
    p.success(out, &format!("dim W = {}", plane.dimension))
}

pub fn render_kernel_image(
    p: &dyn Presenter,
    out: &mut dyn Write,
    result: &KernelImage,
) -> io::Result<()> {
    p.title(out, "KERNEL AND IMAGE")?;
    writeln!(
        out,
        "  T: R^{} -> R^{}",
        result.domain_dim, result.codomain_dim
    )?;

    p.section(out, "Kernel")?;
    if result.kernel_is_trivial() {
        writeln!(out, "  Ker(T) = {{0}}")?;
    } else {
        write_vectors(out, &result.kernel, "k")?;
    }
    writeln!(out, "  nullity = {}", result.nullity)?;

    p.section(out, "Image")?;
    if result.image.is_empty() {
        writeln!(out, "  Im(T) = {{0}}")?;
    } else {
        write_vectors(out, &result.image, "w")?;
    }
    writeln!(out, "  rank = {}", result.rank)?;

    let summary = format!(
        "rank + nullity = {} + {} = {} (dim V = {})",
        result.rank,
        result.nullity,
        result.rank + result.nullity,
        result.domain_dim
    );
    if result.rank_nullity_holds() {
        p.success(out, &summary)
    } else {
        p.warning(out, &summary)
    }
}

pub fn render_change_of_basis(
    p: &dyn Presenter,
    out: &mut dyn Write,
    canonical: &Matrix,
    result: &Matrix,
) -> io::Result<()> {
    p.title(out, "MATRIX IN NEW BASES")?;
    p.section(out, "[T] in canonical bases")?;
    write_matrix(out, canonical)?;
    p.section(out, "[T] from beta to gamma")?;
    write_matrix(out, result)
}

pub fn render_eigen(
    p: &dyn Presenter,
    out: &mut dyn Write,
    operator: &Matrix,
    analysis: &EigenAnalysis,
) -> io::Result<()> {
    p.title(out, "EIGENVALUES AND EIGENVECTORS")?;
    p.section(out, "[T] operator matrix")?;
    write_matrix(out, operator)?;
    match analysis.method {
        EigenMethod::ClosedForm => writeln!(out, "  method: characteristic polynomial")?,
        EigenMethod::QrIteration { iterations } => {
            writeln!(out, "  method: QR iteration ({} steps)", iterations)?
        }
    }

    p.section(out, "Eigenvalues")?;
    for (i, value) in analysis.eigenvalues.iter().enumerate() {
        writeln!(out, "  lambda{} = {}", i + 1, format_complex(*value))?;
    }

    p.section(out, "Eigenspaces")?;
    for space in &analysis.eigenspaces {
        let label = format_complex(space.eigenvalue);
        if space.basis.is_empty() {
            writeln!(out, "  lambda = {}: no eigenvectors found", label)?;
            continue;
        }
        writeln!(out, "  lambda = {} (dimension {})", label, space.dimension())?;
        match &space.basis {
            Eigenvectors::Real(basis) => write_vectors(out, basis, "  v")?,
            Eigenvectors::Complex(basis) => {
                for (i, v) in basis.iter().enumerate() {
                    writeln!(out, "    v{} = {}", i + 1, format_complex_vector(v))?;
                }
            }
        }
    }
    Ok(())
}

/// Reports a failed task; singular bases get the "not a valid basis" wording.
pub fn render_task_error(p: &dyn Presenter, out: &mut dyn Write, err: &TaskError) -> io::Result<()> {
    match err {
        TaskError::InvalidBasis { which } => p.error(
            out,
            &format!("{} is not a valid basis: {}", which, err),
        ),
        other => p.error(out, &other.to_string()),
    }
}
