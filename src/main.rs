fn main() -> anyhow::Result<()> {
    taskflow_lib::run()?;
    Ok(())
}
