pub mod aliases {
    pub type Fallible<T> = ::anyhow::Result<T>;
}

pub mod extensions {
    use ::anyhow::Context as _;

    use crate::utils::aliases::Fallible;

    pub trait ArgMatchesExt {
        /// Like [`::clap::ArgMatches::get_one`], for arguments clap already guarantees.
        fn required<T>(&self, id: &str) -> Fallible<&T>
        where
            T: ::std::any::Any + Clone + Send + Sync + 'static;
    }

    impl ArgMatchesExt for ::clap::ArgMatches {
        fn required<T>(&self, id: &str) -> Fallible<&T>
        where
            T: ::std::any::Any + Clone + Send + Sync + 'static,
        {
            self.get_one::<T>(id)
                .with_context(|| format!("missing value for argument `{}`", id))
        }
    }
}
