use super::context::{get_current_context, OperationContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Replace the default panic output with a crash report naming the command
/// and register file in use.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    eprintln!("riskmap {VERSION} crashed");
    eprintln!("{}", "-".repeat(40));
    eprintln!("{}", panic_message(info));
    if let Some(location) = info.location() {
        eprintln!("  at {}:{}", location.file(), location.line());
    }
    for line in context_lines(&context) {
        eprintln!("{line}");
    }
    eprintln!();
    eprintln!("Changes made by the failed command were not saved.");
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn context_lines(context: &OperationContext) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(operation) = context.operation {
        lines.push(format!("  command: {operation}"));
    }
    if let Some(path) = &context.register_path {
        lines.push(format!("  register: {}", path.display()));
    }
    lines
}
