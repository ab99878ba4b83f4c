use super::{App, Argument};

fn push_row(out: &mut String, cells: &[String]) {
    out.push_str("    ");
    out.push_str(&cells.join("   "));
    out.push('\n');
}

impl App {
    /// Render the usage line followed by the flag and argument tables.
    pub fn help(&self) -> String {
        let mut out = format!("usage: {}", self.name);
        if !self.flags.is_empty() {
            out.push_str(" [<flags>]");
        }
        for arg in &self.required_args {
            out.push_str(&format!(" <{}>", arg.name));
        }
        if let Some(arg) = &self.excess {
            out.push_str(&format!(" [<{}>...]", arg.name));
        }
        out.push('\n');

        if !self.flags.is_empty() {
            out.push_str("\nFlags:\n");
            for flag in &self.flags {
                let mut cells = vec![flag.name()];
                if let Some(handler) = flag.handler() {
                    cells.push(handler.type_name());
                }
                if let Some(default) = &flag.default {
                    cells.push(format!("default={default}"));
                }
                if flag.min > 0 {
                    cells.push("required".to_string());
                }
                push_row(&mut out, &cells);
            }
        }

        let args: Vec<(String, &Argument)> = self
            .required_args
            .iter()
            .map(|a| (format!("<{}>", a.name), a))
            .chain(self.excess.iter().map(|a| (format!("<{}>...", a.name), a)))
            .collect();
        if !args.is_empty() {
            out.push_str("\nArgs:\n");
            for (label, arg) in args {
                push_row(&mut out, &[label, arg.handler.type_name()]);
            }
        }

        out
    }
}
