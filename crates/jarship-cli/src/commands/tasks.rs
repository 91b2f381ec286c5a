use console::Style;
use miette::Result;

use jarship_ops::ops_tasks::list_tasks;

pub fn exec(all: bool) -> Result<()> {
    let bold = Style::new().bold();
    let tasks = list_tasks(all);
    let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0);

    println!("{}", bold.apply_to(if all { "All tasks" } else { "Lifecycle tasks" }));
    for task in &tasks {
        println!("  {:<width$}  {}", task.name, task.description);
        if all && !task.depends_on.is_empty() {
            println!("  {:<width$}    depends on: {}", "", task.depends_on.join(", "));
        }
    }
    if !all {
        println!();
        println!("Run 'jarship tasks --all' to see every task.");
    }
    Ok(())
}
