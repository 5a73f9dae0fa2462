//! Transform resolver: canvas element → `Viewport`.
//!
//! Queried once per pointer-move, so the canvas can be mid-zoom-animation
//! and drags still track. Hosts either publish their pan/zoom state
//! directly (`TransformInput::State`) or hand back the CSS transform they
//! rendered, which is parsed here with `winnow`.
//!
//! Resolution never fails on a bad transform: anything unparsable or
//! degenerate falls back to `CanvasTransform::IDENTITY` with a warning.
//! Only a missing canvas yields `None`.

use crate::error::TransformError;
use crate::transform::{CanvasTransform, Viewport};
use kurbo::{Affine, Point, Vec2};
use std::borrow::Cow;
use winnow::ascii::space0;
use winnow::combinator::separated;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// The transform a canvas reports for its content layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformInput<'a> {
    /// Pan/zoom state published directly by the canvas.
    State(CanvasTransform),
    /// A CSS `transform` value, e.g. from `getComputedStyle`.
    Css(Cow<'a, str>),
    /// An already-composed 2-D matrix.
    Matrix(Affine),
}

/// Anything that can report where the canvas is and how it is transformed.
pub trait CanvasSource {
    /// Screen-space top-left of the canvas element, `None` once unmounted.
    fn canvas_origin(&self) -> Option<Point>;

    /// The transform applied to the canvas content, `None` if there is none.
    fn canvas_transform(&self) -> Option<TransformInput<'_>>;
}

/// Resolve the canvas into a `Viewport`.
///
/// Returns `None` only when the canvas itself is gone.
pub fn resolve<S: CanvasSource + ?Sized>(source: &S) -> Option<Viewport> {
    let origin = source.canvas_origin()?;
    if !origin.is_finite() {
        log::warn!("canvas origin is not finite ({origin:?}), skipping");
        return None;
    }
    let transform = match source.canvas_transform() {
        Some(input) => resolve_transform(&input),
        None => CanvasTransform::IDENTITY,
    };
    Some(Viewport::new(origin, transform))
}

/// Turn a reported transform into scale + translation, falling back to the
/// identity on any failure.
pub fn resolve_transform(input: &TransformInput<'_>) -> CanvasTransform {
    let result = match input {
        TransformInput::State(t) if t.is_valid() => Ok(*t),
        TransformInput::State(t) => Err(TransformError::Degenerate { scale: t.scale }),
        TransformInput::Css(css) => parse_css_transform(css).and_then(CanvasTransform::from_affine),
        TransformInput::Matrix(m) => CanvasTransform::from_affine(*m),
    };
    result.unwrap_or_else(|err| {
        log::warn!("canvas transform unusable, assuming identity: {err}");
        CanvasTransform::IDENTITY
    })
}

// ─── CSS transform parsing ───────────────────────────────────────────────

/// Parse a CSS `transform` value into a 2-D affine.
///
/// Accepts `none`, `matrix()`, `matrix3d()` (its 2-D part), and chains of
/// `translate*()` / `scale*()` with optional `px` units. Functions compose
/// left to right, as in CSS.
///
/// # Errors
/// Returns a `TransformError` for syntax errors, unknown functions, or a
/// wrong number of arguments.
pub fn parse_css_transform(input: &str) -> Result<Affine, TransformError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "none" {
        return Ok(Affine::IDENTITY);
    }

    let mut rest = trimmed;
    let mut affine = Affine::IDENTITY;
    while !rest.is_empty() {
        let (name, args) = parse_function
            .parse_next(&mut rest)
            .map_err(|e| TransformError::Syntax {
                input: input.to_string(),
                message: e.to_string(),
            })?;
        affine = affine * function_to_affine(name, &args)?;
        rest = rest.trim_start();
    }
    Ok(affine)
}

fn function_to_affine(name: &str, args: &[f64]) -> Result<Affine, TransformError> {
    let arity = |expected: &'static str| TransformError::Arity {
        function: name.to_string(),
        expected,
        found: args.len(),
    };

    match name {
        "matrix" => match *args {
            [a, b, c, d, e, f] => Ok(Affine::new([a, b, c, d, e, f])),
            _ => Err(arity("6")),
        },
        "matrix3d" => {
            // Column-major 4×4; the 2-D part lives in m11 m12 m21 m22 m41 m42.
            if args.len() != 16 {
                return Err(arity("16"));
            }
            Ok(Affine::new([
                args[0], args[1], args[4], args[5], args[12], args[13],
            ]))
        }
        "translate" => match *args {
            [x] => Ok(Affine::translate(Vec2::new(x, 0.0))),
            [x, y] => Ok(Affine::translate(Vec2::new(x, y))),
            _ => Err(arity("1 or 2")),
        },
        "translate3d" => match *args {
            [x, y, _z] => Ok(Affine::translate(Vec2::new(x, y))),
            _ => Err(arity("3")),
        },
        "translateX" => match *args {
            [x] => Ok(Affine::translate(Vec2::new(x, 0.0))),
            _ => Err(arity("1")),
        },
        "translateY" => match *args {
            [y] => Ok(Affine::translate(Vec2::new(0.0, y))),
            _ => Err(arity("1")),
        },
        "scale" => match *args {
            [s] => Ok(Affine::scale(s)),
            [sx, sy] => Ok(Affine::scale_non_uniform(sx, sy)),
            _ => Err(arity("1 or 2")),
        },
        "scale3d" => match *args {
            [sx, sy, _sz] => Ok(Affine::scale_non_uniform(sx, sy)),
            _ => Err(arity("3")),
        },
        "scaleX" => match *args {
            [sx] => Ok(Affine::scale_non_uniform(sx, 1.0)),
            _ => Err(arity("1")),
        },
        "scaleY" => match *args {
            [sy] => Ok(Affine::scale_non_uniform(1.0, sy)),
            _ => Err(arity("1")),
        },
        other => Err(TransformError::UnknownFunction(other.to_string())),
    }
}

// ─── Low-level parsers ───────────────────────────────────────────────────

/// `name( arg, arg, ... )`
fn parse_function<'a>(input: &mut &'a str) -> ModalResult<(&'a str, Vec<f64>)> {
    let name = take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)?;
    *input = input.trim_start();
    let _ = '('.parse_next(input)?;
    *input = input.trim_start();
    let args: Vec<f64> = separated(0.., parse_length, parse_comma).parse_next(input)?;
    *input = input.trim_start();
    let _ = ')'.parse_next(input)?;
    Ok((name, args))
}

/// A number with an optional `px` unit. Computed styles may use exponents
/// (`1e-05`), so the token is handed to `f64::from_str` whole.
fn parse_length(input: &mut &str) -> ModalResult<f64> {
    let token = take_while(1.., |c: char| {
        c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
    })
    .parse_next(input)?;
    let value = token
        .parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))?;
    if input.starts_with("px") {
        *input = &input[2..];
    }
    Ok(value)
}

fn parse_comma(input: &mut &str) -> ModalResult<()> {
    (space0, ',', space0).void().parse_next(input)
}
