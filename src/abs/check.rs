//! Draining and reporting the OpenGL error queue.

use glow::HasContext;

use crate::error::{Error, Result};

/// Symbolic name of an OpenGL error code.
pub fn gl_error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "GL_UNKNOWN_ERROR",
    }
}

/// Pops error codes off the queue until `next` reports `NO_ERROR`.
///
/// Stops after a bounded number of codes, since a lost context reports errors forever.
fn drain(mut next: impl FnMut() -> u32) -> Vec<&'static str> {
    let mut errors = Vec::new();
    for _ in 0..32 {
        match next() {
            glow::NO_ERROR => break,
            code => errors.push(gl_error_name(code)),
        }
    }
    errors
}

/// Fails with every pending GL error, tagged with what was being done.
pub fn check_gl(gl: &glow::Context, context: &str) -> Result<()> {
    let errors = drain(|| unsafe { gl.get_error() });
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Gl {
            context: context.to_string(),
            errors,
        })
    }
}

/// Discards pending GL errors. Returns whether there were any.
pub fn clear_gl(gl: &glow::Context) -> bool {
    let errors = drain(|| unsafe { gl.get_error() });
    if !errors.is_empty() {
        log::debug!("Discarded GL errors: {}", errors.join(", "));
    }
    !errors.is_empty()
}

/// Turns the last SDL error into an [`Error::Sdl`] tagged with the failed step.
pub fn sdl_error(step: &str, message: impl std::fmt::Display) -> Error {
    Error::Sdl(format!("{step} ({message})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(gl_error_name(glow::INVALID_ENUM), "GL_INVALID_ENUM");
        assert_eq!(gl_error_name(glow::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(gl_error_name(0xdead), "GL_UNKNOWN_ERROR");
    }

    #[test]
    fn test_drain_stops_at_no_error() {
        let mut queue = vec![glow::INVALID_VALUE, glow::INVALID_OPERATION].into_iter();
        let errors = drain(|| queue.next().unwrap_or(glow::NO_ERROR));
        assert_eq!(errors, vec!["GL_INVALID_VALUE", "GL_INVALID_OPERATION"]);
    }

    #[test]
    fn test_drain_is_bounded() {
        let errors = drain(|| glow::CONTEXT_LOST);
        assert_eq!(errors.len(), 32);
    }

    #[test]
    fn test_sdl_error_message() {
        let err = sdl_error("Unable to open SDL window", "No available video device");
        assert_eq!(
            err.to_string(),
            "SDL: Unable to open SDL window (No available video device)"
        );
    }
}
