use std::fs;
use std::io;
use std::mem;
use std::rc::Rc;

pub type Source = Rc<SourceImpl>;

/// A source file split into physical lines. Every line keeps its trailing
/// newline character except possibly the last.
pub struct SourceImpl {
    pub name: String,
    pub lines: Vec<String>,
}

pub fn file(name: &str) -> io::Result<Source> {
    let content = fs::read_to_string(name)?;
    Ok(Rc::new(SourceImpl {
        name: String::from(name),
        lines: split_lines(&content),
    }))
}

pub fn text(text: &str) -> Source {
    Rc::new(SourceImpl {
        name: String::from("<text>"),
        lines: split_lines(text),
    })
}

fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for character in content.chars() {
        current.push(character);
        if character == '\n' {
            lines.push(mem::replace(&mut current, String::new()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
