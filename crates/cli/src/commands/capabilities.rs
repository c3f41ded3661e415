//! `capstan capabilities` — List the registered capability set.

use capstan_registry::demo_registry;

pub fn run() -> anyhow::Result<()> {
    let registry = demo_registry();

    println!("Resources:");
    for resource in registry.iter_resources() {
        println!("  {:<18} {} ({})", resource.id, resource.title, resource.uri);
        println!("  {:<18} {}", "", resource.description);
    }

    println!();
    println!("Tools:");
    for tool in registry.iter_tools() {
        println!("  {:<18} {}", tool.name(), tool.description());
        for param in tool.params() {
            println!(
                "  {:<18}   {} ({}{})",
                "",
                param.name,
                param.kind.label(),
                if param.required { ", required" } else { "" }
            );
        }
    }

    println!();
    println!("Prompts:");
    for prompt in registry.iter_prompts() {
        println!("  {:<18} {}", prompt.name, prompt.description);
        println!("  {:<18}   inputs: {}", "", prompt.required_inputs.join(", "));
    }

    Ok(())
}
