/// Invokes `$target!` once per tuple arity, passing `Ident: index` pairs for every element.
macro_rules! impl_tuples {
	// Internal
	(
		$target:path : []
		$(| [
			$({$($pre:tt)*})*
		])?
	) => { /* terminal recursion case */ };
	(
		$target:path : [
			{$($next:tt)*}
			// Remaining invocations
			$($rest:tt)*
		] $(| [
			// Accumulated arguments
			$({$($pre:tt)*})*
		])?
	) => {
		$target!(
			$($($($pre)*,)*)?
			$($next)*
		);
		$crate::utils::impl_tuples!(
			$target : [
				$($rest)*
			] | [
				$($({$($pre)*})*)?
				{$($next)*}
			]
		);
	};

	// Public
	($target:path; no_unit) => {
		$crate::utils::impl_tuples!(
			$target : [
				{A: 0}
				{B: 1}
				{C: 2}
				{D: 3}
				{E: 4}
				{F: 5}
				{G: 6}
				{H: 7}
				{I: 8}
				{J: 9}
				{K: 10}
				{L: 11}
			]
		);
	};
	($target:path) => {
		$target!();
		$crate::utils::impl_tuples!($target; no_unit);
	};
}

pub(crate) use impl_tuples;

/// Counts the identifiers passed to it in a `const` context.
macro_rules! count_idents {
    ($($para:ident),*) => {
        <[&str]>::len(&[$(stringify!($para)),*])
    };
}

pub(crate) use count_idents;
