use crate::CmdRun;
use facade_errors::FacadeError;
use facade_runtime::Facade;

pub fn run_cmd(cmd: CmdRun) -> Result<(), FacadeError> {
    let facade = Facade::from_paths(&cmd.config)?;
    facade.run()?;
    Ok(())
}
