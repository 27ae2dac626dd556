// src/system/output.rs

use console::style;
use std::sync::{Arc, Mutex, PoisonError};

/// Canal de salida de los mensajes del framework.
pub trait OutputProvider {
    fn show_information(&self, text: &str);
    fn show_warning(&self, text: &str);
    fn show_error(&self, text: &str);
}

/// Salida estándar de consola: información por stdout, avisos (amarillo) y errores (rojo) por stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl OutputProvider for ConsoleOutput {
    fn show_information(&self, text: &str) {
        println!("{}", text);
    }

    fn show_warning(&self, text: &str) {
        eprintln!("{}", style(text).yellow().for_stderr());
    }

    fn show_error(&self, text: &str) {
        eprintln!("{}", style(text).red().for_stderr());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Information,
    Warning,
    Error,
}

/// Guarda los mensajes en memoria. Los clones comparten el mismo búfer.
#[derive(Debug, Default, Clone)]
pub struct BufferedOutput {
    messages: Arc<Mutex<Vec<(MessageKind, String)>>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn information(&self) -> Vec<String> {
        self.of_kind(MessageKind::Information)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.of_kind(MessageKind::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_kind(MessageKind::Error)
    }

    fn of_kind(&self, kind: MessageKind) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text)
            .collect()
    }

    fn push(&self, kind: MessageKind, text: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, text.to_string()));
    }
}

impl OutputProvider for BufferedOutput {
    fn show_information(&self, text: &str) {
        self.push(MessageKind::Information, text);
    }

    fn show_warning(&self, text: &str) {
        self.push(MessageKind::Warning, text);
    }

    fn show_error(&self, text: &str) {
        self.push(MessageKind::Error, text);
    }
}
