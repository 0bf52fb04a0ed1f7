//! Built-in compiler families.
//!
//! Command lists are in preference order, most preferred first.

use crate::core::errors::KbError;
use crate::core::family::{CompilerFamily, FamilyFlags};
use crate::core::registry::{CompilerRegistry, RegistryKind};
use crate::core::role::{
    CC_ROLE, CXX_ROLE, FC_ROLE, MPI_CC_ROLE, MPI_CXX_ROLE, MPI_FC_ROLE, SHMEM_CC_ROLE,
    SHMEM_CXX_ROLE, SHMEM_FC_ROLE, UPC_ROLE,
};

pub const SYSTEM: &str = "System";
pub const GNU: &str = "GNU";
pub const INTEL: &str = "Intel";
pub const PGI: &str = "PGI";
pub const IBM: &str = "IBM";
pub const CRAY: &str = "Cray";
pub const OPENSHMEM: &str = "OpenSHMEM";

/// Flags Cray wrappers print their wrapped command line with.
const CRAY_SHOW_WRAPPER: &[&str] = &["-craype-verbose"];
const CRAY_PE_SHOW_WRAPPER: &[&str] = &["-craype-verbose", "--version", "-E"];

/// Build the registry for `kind` from the built-in tables.
pub fn builtin(kind: RegistryKind) -> Result<CompilerRegistry, KbError> {
    match kind {
        RegistryKind::Host => host_registry(),
        RegistryKind::Mpi => mpi_registry(),
        RegistryKind::Shmem => shmem_registry(),
    }
}

/// Host compiler families.
pub fn host_registry() -> Result<CompilerRegistry, KbError> {
    let mut registry = CompilerRegistry::new(RegistryKind::Host);

    let mut system = CompilerFamily::new(SYSTEM);
    system.add(CC_ROLE, ["cc"])?;
    system.add(CXX_ROLE, ["c++", "cxx", "CC"])?;
    system.add(FC_ROLE, ["ftn", "f90", "f77"])?;
    system.add(UPC_ROLE, ["upc"])?;
    registry.register(system)?;

    let mut gnu = CompilerFamily::new(GNU);
    gnu.add(CC_ROLE, ["gcc"])?;
    gnu.add(CXX_ROLE, ["g++"])?;
    gnu.add(FC_ROLE, ["gfortran"])?;
    gnu.add(UPC_ROLE, ["gupc"])?;
    registry.register(gnu)?;

    let mut intel = CompilerFamily::new(INTEL);
    intel.add(CC_ROLE, ["icc"])?;
    intel.add(CXX_ROLE, ["icpc"])?;
    intel.add(FC_ROLE, ["ifort"])?;
    registry.register(intel)?;

    let mut pgi = CompilerFamily::new(PGI);
    pgi.add(CC_ROLE, ["pgcc"])?;
    pgi.add(CXX_ROLE, ["pgc++", "pgcxx", "pgCC"])?;
    pgi.add(FC_ROLE, ["pgf90", "pgf77"])?;
    registry.register(pgi)?;

    let mut ibm = CompilerFamily::new(IBM);
    ibm.add(CC_ROLE, ["xlc"])?;
    ibm.add(CXX_ROLE, ["xlc++", "xlC"])?;
    ibm.add(FC_ROLE, ["xlf"])?;
    registry.register(ibm)?;

    let mut cray = CompilerFamily::with_flags(
        CRAY,
        FamilyFlags::default().with_show_wrapper(CRAY_SHOW_WRAPPER.iter().copied()),
    );
    cray.add(CC_ROLE, ["cc"])?;
    cray.add(CXX_ROLE, ["CC", "c++", "cxx"])?;
    cray.add(FC_ROLE, ["ftn", "f90", "f77"])?;
    cray.add(UPC_ROLE, ["upc"])?;
    registry.register(cray)?;

    Ok(registry)
}

/// MPI compiler wrapper families.
pub fn mpi_registry() -> Result<CompilerRegistry, KbError> {
    let mut registry = CompilerRegistry::new(RegistryKind::Mpi);

    let mut system = CompilerFamily::with_flags(SYSTEM, FamilyFlags::mpi());
    system.add(MPI_CC_ROLE, ["mpicc"])?;
    system.add(MPI_CXX_ROLE, ["mpic++", "mpicxx", "mpiCC"])?;
    system.add(MPI_FC_ROLE, ["mpiftn", "mpif90", "mpif77"])?;
    registry.register(system)?;

    let mut intel = CompilerFamily::with_flags(INTEL, FamilyFlags::mpi());
    intel.add(MPI_CC_ROLE, ["mpiicc"])?;
    intel.add(MPI_CXX_ROLE, ["mpiicpc"])?;
    intel.add(MPI_FC_ROLE, ["mpiifort"])?;
    registry.register(intel)?;

    let mut ibm = CompilerFamily::with_flags(IBM, FamilyFlags::mpi());
    ibm.add(MPI_CC_ROLE, ["mpixlc", "mpixlc_r"])?;
    ibm.add(MPI_CXX_ROLE, ["mpixlcxx", "mpixlcxx_r"])?;
    ibm.add(
        MPI_FC_ROLE,
        [
            "mpixlf95",
            "mpixlf95_r",
            "mpixlf90",
            "mpixlf90_r",
            "mpixlf2003",
            "mpixlf2003_r",
            "mpixlf2008",
            "mpixlf2008_r",
            "mpixlf77",
            "mpixlf77_r",
        ],
    )?;
    registry.register(ibm)?;

    let mut cray = CompilerFamily::with_flags(
        CRAY,
        FamilyFlags::mpi().with_show_wrapper(CRAY_PE_SHOW_WRAPPER.iter().copied()),
    );
    cray.add(MPI_CC_ROLE, ["cc"])?;
    cray.add(MPI_CXX_ROLE, ["CC"])?;
    cray.add(MPI_FC_ROLE, ["ftn"])?;
    registry.register(cray)?;

    Ok(registry)
}

/// SHMEM compiler wrapper families.
pub fn shmem_registry() -> Result<CompilerRegistry, KbError> {
    let mut registry = CompilerRegistry::new(RegistryKind::Shmem);

    let mut openshmem = CompilerFamily::new(OPENSHMEM);
    openshmem.add(SHMEM_CC_ROLE, ["oshcc"])?;
    openshmem.add(SHMEM_CXX_ROLE, ["oshcxx", "oshc++"])?;
    openshmem.add(SHMEM_FC_ROLE, ["oshfort"])?;
    registry.register(openshmem)?;

    let mut cray = CompilerFamily::with_flags(
        CRAY,
        FamilyFlags::default().with_show_wrapper(CRAY_PE_SHOW_WRAPPER.iter().copied()),
    );
    cray.add(SHMEM_CC_ROLE, ["cc"])?;
    cray.add(SHMEM_CXX_ROLE, ["CC"])?;
    cray.add(SHMEM_FC_ROLE, ["ftn"])?;
    registry.register(cray)?;

    Ok(registry)
}
