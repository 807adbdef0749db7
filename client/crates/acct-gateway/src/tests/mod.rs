mod in_memory_backend;
