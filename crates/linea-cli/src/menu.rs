//! The interactive console: a menu loop over any line reader and writer.

use std::io::{self, BufRead, Write};

use linea_core::config::EngineConfig;
use linea_core::tasks::{change_of_basis, eigen_analysis, kernel_and_image, plane_basis};
use linea_core::Matrix;

use crate::input::Prompter;
use crate::render::{
    render_change_of_basis, render_eigen, render_kernel_image, render_menu, render_plane,
    render_task_error, Presenter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the menu until the user picks 0 or the input ends.
pub fn run_menu<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    presenter: &dyn Presenter,
    config: &EngineConfig,
) -> io::Result<()> {
    let mut prompter = Prompter::new(reader, writer);

    loop {
        render_menu(presenter, prompter.writer())?;
        let Some(choice) = prompter.read_line("Choose an option: ")? else {
            break;
        };

        let flow = match choice.as_str() {
            "1" => plane_task(&mut prompter, presenter, config)?,
            "2" => kernel_task(&mut prompter, presenter, config)?,
            "3" => change_of_basis_task(&mut prompter, presenter, config)?,
            "4" => eigen_task(&mut prompter, presenter, config)?,
            "0" => Flow::Quit,
            other => {
                presenter.error(
                    prompter.writer(),
                    &format!("'{}' is not a valid option, choose 0-4", other),
                )?;
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            break;
        }
    }

    writeln!(prompter.writer(), "Goodbye.")?;
    log::debug!("[linea] menu session ended");
    Ok(())
}

fn plane_task<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    presenter: &dyn Presenter,
    config: &EngineConfig,
) -> io::Result<Flow> {
    writeln!(prompter.writer(), "Plane W: ax + by + cz = 0")?;
    let mut coefficients = [0.0; 3];
    for (slot, name) in coefficients.iter_mut().zip(["a", "b", "c"]) {
        let Some(x) = prompter.read_number(&format!("  {} = ", name))? else {
            return Ok(Flow::Quit);
        };
        *slot = x;
    }
    let [a, b, c] = coefficients;
    let plane = plane_basis(a, b, c, config.eps);
    render_plane(presenter, prompter.writer(), &plane)?;
    Ok(Flow::Continue)
}

/// Asks for the kind of map and its matrix in canonical bases.
///
/// An unknown choice falls back to the 2x2 identity with a warning.
fn read_transformation<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    presenter: &dyn Presenter,
) -> io::Result<Option<Matrix>> {
    writeln!(prompter.writer(), "  1. T: R^2 -> R^2")?;
    writeln!(prompter.writer(), "  2. T: R^3 -> R^3")?;
    writeln!(prompter.writer(), "  3. T: R^n -> R^m")?;
    let Some(choice) = prompter.read_line("Choose the map: ")? else {
        return Ok(None);
    };

    let (rows, cols) = match choice.as_str() {
        "1" => (2, 2),
        "2" => (3, 3),
        "3" => {
            let Some(n) = prompter.read_dimension("  dim V (domain) = ")? else {
                return Ok(None);
            };
            let Some(m) = prompter.read_dimension("  dim W (codomain) = ")? else {
                return Ok(None);
            };
            (m, n)
        }
        _ => {
            presenter.warning(prompter.writer(), "invalid choice, using the 2x2 identity")?;
            return Ok(Some(Matrix::identity(2)));
        }
    };

    writeln!(
        prompter.writer(),
        "Matrix of T in canonical bases ({} rows of {} numbers):",
        rows,
        cols
    )?;
    prompter.read_matrix(rows, cols, "Row")
}

fn kernel_task<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    presenter: &dyn Presenter,
    config: &EngineConfig,
) -> io::Result<Flow> {
    let Some(a) = read_transformation(prompter, presenter)? else {
        return Ok(Flow::Quit);
    };
    let result = kernel_and_image(&a, config.eps);
    render_kernel_image(presenter, prompter.writer(), &result)?;
    Ok(Flow::Continue)
}

fn change_of_basis_task<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    presenter: &dyn Presenter,
    config: &EngineConfig,
) -> io::Result<Flow> {
    let Some(a) = read_transformation(prompter, presenter)? else {
        return Ok(Flow::Quit);
    };
    let (m, n) = a.dimensions();

    writeln!(prompter.writer(), "Basis beta of V ({} vectors):", n)?;
    let Some(p_beta) = prompter.read_basis("beta", n, n)? else {
        return Ok(Flow::Quit);
    };
    writeln!(prompter.writer(), "Basis gamma of W ({} vectors):", m)?;
    let Some(p_gamma) = prompter.read_basis("gamma", m, m)? else {
        return Ok(Flow::Quit);
    };

    match change_of_basis(&a, &p_beta, &p_gamma, config.eps) {
        Ok(result) => render_change_of_basis(presenter, prompter.writer(), &a, &result)?,
        Err(e) => render_task_error(presenter, prompter.writer(), &e)?,
    }
    Ok(Flow::Continue)
}

fn eigen_task<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    presenter: &dyn Presenter,
    config: &EngineConfig,
) -> io::Result<Flow> {
    writeln!(prompter.writer(), "  1. 2x2 operator")?;
    writeln!(prompter.writer(), "  2. 3x3 operator")?;
    let Some(choice) = prompter.read_line("Choose the size: ")? else {
        return Ok(Flow::Quit);
    };
    let n = match choice.as_str() {
        "1" => 2,
        "2" => 3,
        _ => {
            presenter.warning(prompter.writer(), "invalid choice, using a 2x2 operator")?;
            2
        }
    };

    writeln!(prompter.writer(), "Matrix of T ({} rows of {} numbers):", n, n)?;
    let Some(a) = prompter.read_matrix(n, n, "Row")? else {
        return Ok(Flow::Quit);
    };

    match eigen_analysis(&a, config) {
        Ok(analysis) => render_eigen(presenter, prompter.writer(), &a, &analysis)?,
        Err(e) => render_task_error(presenter, prompter.writer(), &e)?,
    }
    Ok(Flow::Continue)
}
