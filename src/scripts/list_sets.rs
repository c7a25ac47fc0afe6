// src/scripts/list_sets.rs
use crate::config::jisc_home;
use crate::task_sets;

pub fn run() -> anyhow::Result<()> {
    let user_dir = jisc_home()?.join("sets");
    let sets = task_sets::discover(Some(&user_dir))?;

    println!("📋 Available task sets ({}):", sets.len());
    for set in &sets {
        let tasks = set.read_tasks()?;
        println!("  {} [{} task(s)] - {}", set.name, tasks.len(), set.origin_display());
    }

    println!();
    println!("💡 Add your own sets as plain text files in {}", user_dir.display());
    Ok(())
}
