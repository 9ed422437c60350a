pub mod interrupt_register;
